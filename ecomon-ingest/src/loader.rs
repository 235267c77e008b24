//! The Loader: single writer into the observation store
//!
//! Every frame passes through here. Identity is verified against the
//! catalog before anything touches the observations table, so unknown or
//! deactivated series are rejected with zero writes.

use chrono::NaiveDate;
use ecomon_common::db::{Catalog, ObservationStore, SeriesKey};
use ecomon_common::{Frame, Result};
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Outcome of one load call
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadReport {
    pub inserted: u64,
    pub updated: u64,
    /// Rows dropped because the value was null
    pub skipped: u64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl LoadReport {
    pub fn written(&self) -> u64 {
        self.inserted + self.updated
    }
}

impl std::fmt::Display for LoadReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} inserted, {} updated, {} skipped",
            self.inserted, self.updated, self.skipped
        )
    }
}

/// Single writer into the observation store
pub struct Loader {
    catalog: Catalog,
    store: ObservationStore,
}

impl Loader {
    pub fn new(pool: &SqlitePool) -> Self {
        Self {
            catalog: Catalog::new(pool.clone()),
            store: ObservationStore::new(pool.clone()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &ObservationStore {
        &self.store
    }

    /// Upsert a normalized frame under the given identity.
    ///
    /// Rejects unknown and inactive identities before writing. Null-valued
    /// rows are dropped and counted as skipped. An empty frame is a no-op
    /// that still reports counts.
    pub async fn load(&self, key: SeriesKey, frame: &Frame) -> Result<LoadReport> {
        self.catalog.lookup_series(key).await?;
        let rows = project(frame);
        let skipped = (frame.len() - rows.len()) as u64;

        if rows.is_empty() {
            debug!("Series {}: nothing to write ({} null rows)", key, skipped);
            return Ok(LoadReport {
                skipped,
                ..Default::default()
            });
        }

        let counts = self.store.upsert_many(key, &rows).await?;
        let report = LoadReport {
            inserted: counts.inserted,
            updated: counts.updated,
            skipped,
            first_date: rows.first().map(|(d, _)| *d),
            last_date: rows.last().map(|(d, _)| *d),
        };
        info!("Series {}: {}", key, report);
        Ok(report)
    }

    /// Maintenance path: wipe the series, then insert the new frame, in one
    /// transaction.
    pub async fn clear_and_replace(&self, key: SeriesKey, frame: &Frame) -> Result<LoadReport> {
        self.catalog.lookup_series(key).await?;
        let rows = project(frame);
        let skipped = (frame.len() - rows.len()) as u64;

        let counts = self.store.replace_all(key, &rows).await?;
        let report = LoadReport {
            inserted: counts.inserted,
            updated: counts.updated,
            skipped,
            first_date: rows.first().map(|(d, _)| *d),
            last_date: rows.last().map(|(d, _)| *d),
        };
        info!("Series {} rewritten: {}", key, report);
        Ok(report)
    }
}

/// Project a frame to the valued (date, value) rows the store accepts.
/// Rows reach the store in ascending date order regardless of frame order.
fn project(frame: &Frame) -> Vec<(NaiveDate, f64)> {
    let mut rows: Vec<_> = frame.valued_rows().collect();
    rows.sort_by_key(|(date, _)| *date);
    rows
}
