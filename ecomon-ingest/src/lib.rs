//! # Ecomon Ingest
//!
//! The write side of the economic time-series warehouse: declarative
//! ingester registry, source fetching, positional spreadsheet extraction,
//! the single-writer Loader, the sequential batch runner, catalog bootstrap,
//! and the inspection subcommands.

pub mod bootstrap;
pub mod extract;
pub mod ingesters;
pub mod inspect;
pub mod loader;
pub mod registry;
pub mod runner;
pub mod source;

pub use loader::{Loader, LoadReport};
pub use registry::{IngesterSpec, Registry, Selector};
pub use runner::{bulk_run, BatchReport, SeriesStatus};
