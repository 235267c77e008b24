//! Database layer: schema, catalog store, observation store

pub mod catalog;
pub mod init;
pub mod models;
pub mod observations;

pub use catalog::{Catalog, SeriesFilter};
pub use init::init_database;
pub use models::*;
pub use observations::{ObservationStore, UpsertCounts};
