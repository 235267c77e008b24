//! Common error types for the warehouse

use chrono::NaiveDate;
use thiserror::Error;

/// Common result type for warehouse operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the ingestion pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error; fatal for the process
    #[error("Configuration error: {0}")]
    Config(String),

    /// No master row matches the requested identity
    #[error("Unknown series: variable {variable_id}, country {country_id}, type {type_of_series_id}")]
    UnknownSeries {
        variable_id: i64,
        country_id: i64,
        type_of_series_id: i64,
    },

    /// The master row exists but is flagged inactive
    #[error("Inactive series: variable {variable_id}, country {country_id}, type {type_of_series_id}")]
    InactiveSeries {
        variable_id: i64,
        country_id: i64,
        type_of_series_id: i64,
    },

    /// Source unreachable: missing staged file, or URL failure with no fallback
    #[error("Source error: {0}")]
    Source(String),

    /// Positional extraction or coercion produced an unusable frame
    #[error("Parse error: {0}")]
    Parse(String),

    /// First date of a daily frame carries no value, so forward-fill cannot start
    #[error("Leading gap: first date {0} carries no value")]
    LeadingGap(NaiveDate),

    /// Storage-layer uniqueness violation, surfaced with the offending key
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// Network blip or locked database; retried with backoff before failing
    #[error("Transient error: {0}")]
    Transient(String),
}

impl Error {
    /// Transient errors are retried by the batch runner; everything else fails fast.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Transient(_))
    }

    /// Configuration errors abort the whole process with exit code 2.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}
