//! Observation store: the single wide table of (series, date) -> value
//!
//! Uniqueness is enforced by the storage layer, not only by the Loader.
//! Every write path here is transactional at the call boundary; a partial
//! failure leaves the store unchanged.

use crate::db::models::SeriesKey;
use crate::{Error, Result};
use chrono::NaiveDate;
use sqlx::SqlitePool;

/// Insert/overwrite counts from one `upsert_many` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertCounts {
    pub inserted: u64,
    pub updated: u64,
}

/// Write and read access to the `observations` table
#[derive(Clone)]
pub struct ObservationStore {
    pool: SqlitePool,
}

impl ObservationStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Upsert rows for one series in a single transaction, ascending date
    /// order. Insert if absent, overwrite otherwise; later calls win on
    /// conflicting keys.
    pub async fn upsert_many(
        &self,
        key: SeriesKey,
        rows: &[(NaiveDate, f64)],
    ) -> Result<UpsertCounts> {
        let mut tx = self.pool.begin().await?;
        let counts = upsert_rows(&mut tx, key, rows).await?;
        tx.commit().await?;
        Ok(counts)
    }

    /// Delete all observations for the key, then insert the new rows, in one
    /// transaction.
    pub async fn replace_all(
        &self,
        key: SeriesKey,
        rows: &[(NaiveDate, f64)],
    ) -> Result<UpsertCounts> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "DELETE FROM observations \
             WHERE variable_id = ? AND country_id = ? AND type_of_series_id = ?",
        )
        .bind(key.variable_id)
        .bind(key.country_id)
        .bind(key.type_of_series.id())
        .execute(&mut *tx)
        .await?;
        let counts = upsert_rows(&mut tx, key, rows).await?;
        tx.commit().await?;
        Ok(counts)
    }

    pub async fn count_for(&self, key: SeriesKey) -> Result<i64> {
        let count = sqlx::query_scalar(
            "SELECT COUNT(*) FROM observations \
             WHERE variable_id = ? AND country_id = ? AND type_of_series_id = ?",
        )
        .bind(key.variable_id)
        .bind(key.country_id)
        .bind(key.type_of_series.id())
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// First and last observation date, or `None` for an empty series.
    pub async fn range_for(&self, key: SeriesKey) -> Result<Option<(NaiveDate, NaiveDate)>> {
        let row: (Option<NaiveDate>, Option<NaiveDate>) = sqlx::query_as(
            "SELECT MIN(date), MAX(date) FROM observations \
             WHERE variable_id = ? AND country_id = ? AND type_of_series_id = ?",
        )
        .bind(key.variable_id)
        .bind(key.country_id)
        .bind(key.type_of_series.id())
        .fetch_one(&self.pool)
        .await?;
        Ok(match row {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        })
    }

    /// Used by the clear-and-regenerate maintenance path.
    pub async fn delete_all_for(&self, key: SeriesKey) -> Result<u64> {
        let deleted = sqlx::query(
            "DELETE FROM observations \
             WHERE variable_id = ? AND country_id = ? AND type_of_series_id = ?",
        )
        .bind(key.variable_id)
        .bind(key.country_id)
        .bind(key.type_of_series.id())
        .execute(&self.pool)
        .await?
        .rows_affected();
        Ok(deleted)
    }

    /// Wipe the whole table (clear-and-regenerate, before re-running all).
    pub async fn wipe(&self) -> Result<u64> {
        let deleted = sqlx::query("DELETE FROM observations")
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(deleted)
    }

    /// All rows for one series, ascending by date.
    pub async fn fetch_all(&self, key: SeriesKey) -> Result<Vec<(NaiveDate, f64)>> {
        let rows = sqlx::query_as(
            "SELECT date, value FROM observations \
             WHERE variable_id = ? AND country_id = ? AND type_of_series_id = ? \
             ORDER BY date",
        )
        .bind(key.variable_id)
        .bind(key.country_id)
        .bind(key.type_of_series.id())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

async fn upsert_rows(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    key: SeriesKey,
    rows: &[(NaiveDate, f64)],
) -> Result<UpsertCounts> {
    let mut counts = UpsertCounts::default();

    for (date, value) in rows {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM observations \
             WHERE variable_id = ? AND country_id = ? AND type_of_series_id = ? AND date = ?)",
        )
        .bind(key.variable_id)
        .bind(key.country_id)
        .bind(key.type_of_series.id())
        .bind(date)
        .fetch_one(&mut **tx)
        .await?;

        if exists {
            sqlx::query(
                "UPDATE observations SET value = ? \
                 WHERE variable_id = ? AND country_id = ? AND type_of_series_id = ? AND date = ?",
            )
            .bind(value)
            .bind(key.variable_id)
            .bind(key.country_id)
            .bind(key.type_of_series.id())
            .bind(date)
            .execute(&mut **tx)
            .await?;
            counts.updated += 1;
        } else {
            sqlx::query(
                "INSERT INTO observations (variable_id, country_id, type_of_series_id, date, value) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(key.variable_id)
            .bind(key.country_id)
            .bind(key.type_of_series.id())
            .bind(date)
            .bind(value)
            .execute(&mut **tx)
            .await
            .map_err(|e| map_unique_violation(e, key, *date))?;
            counts.inserted += 1;
        }
    }

    Ok(counts)
}

/// A uniqueness violation cannot happen under correct upsert; when it does,
/// surface the offending key instead of a bare driver error.
fn map_unique_violation(e: sqlx::Error, key: SeriesKey, date: NaiveDate) -> Error {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => Error::Integrity(format!(
            "duplicate observation for series {} at {}",
            key, date
        )),
        _ => Error::Database(e),
    }
}
