//! # Ecomon Common Library
//!
//! Shared code for the economic time-series warehouse:
//! - Error type used across the workspace
//! - Configuration resolution
//! - Frame types and the normalization library
//! - Database layer (schema, catalog store, observation store)

pub mod config;
pub mod db;
pub mod error;
pub mod frame;
pub mod normalize;

pub use error::{Error, Result};
pub use frame::{Cell, Frame, RawFrame};
