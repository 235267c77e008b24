//! Catalog store: reference taxonomy and the authoritative series list
//!
//! Mostly read-only from the ingestion pipeline's point of view. Inserts
//! happen only from the bootstrap loader; rows are deactivated, never
//! deleted.

use crate::db::models::{Family, Periodicity, Series, SeriesKey, SubFamily, TypeOfSeries, Variable};
use crate::{Error, Result};
use sqlx::SqlitePool;
use tracing::info;

/// Idempotently insert the three taxonomy rows.
pub async fn ensure_type_of_series_seeded(pool: &SqlitePool) -> Result<()> {
    for tos in TypeOfSeries::ALL {
        sqlx::query("INSERT OR IGNORE INTO type_of_series (id, name) VALUES (?, ?)")
            .bind(tos.id())
            .bind(tos.name())
            .execute(pool)
            .await?;
    }
    Ok(())
}

/// Filters for `list_active_series`; any subset may be set
#[derive(Debug, Clone, Default)]
pub struct SeriesFilter {
    pub periodicity: Option<Periodicity>,
    pub family: Option<i64>,
    pub subfamily: Option<i64>,
    pub country: Option<i64>,
}

/// Read access to the reference model
#[derive(Clone)]
pub struct Catalog {
    pool: SqlitePool,
}

type SeriesRow = (i64, i64, i64, String, Option<String>, Option<String>, Option<String>, i64);

fn series_from_row(row: SeriesRow) -> Result<Series> {
    let (variable_id, country_id, tos_id, periodicity, source, source_url, tag, active) = row;
    let type_of_series = TypeOfSeries::from_id(tos_id).ok_or_else(|| {
        Error::Integrity(format!("master row with unknown type_of_series {}", tos_id))
    })?;
    let periodicity = Periodicity::from_code(&periodicity).ok_or_else(|| {
        Error::Integrity(format!("master row with unknown periodicity {}", periodicity))
    })?;
    Ok(Series {
        variable_id,
        country_id,
        type_of_series,
        periodicity,
        source,
        source_url,
        tag,
        active: active != 0,
    })
}

const SERIES_COLUMNS: &str = "m.variable_id, m.country_id, m.type_of_series_id, m.periodicity, \
                              m.source, m.source_url, m.tag, m.active";

impl Catalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Look up one active series by its natural identity.
    ///
    /// `UnknownSeries` when no master row matches; `InactiveSeries` when the
    /// row exists but has been deactivated. The Loader uses both as hard
    /// rejections.
    pub async fn lookup_series(&self, key: SeriesKey) -> Result<Series> {
        let sql = format!(
            "SELECT {} FROM master m \
             WHERE m.variable_id = ? AND m.country_id = ? AND m.type_of_series_id = ?",
            SERIES_COLUMNS
        );
        let row = sqlx::query_as::<_, SeriesRow>(&sql)
            .bind(key.variable_id)
            .bind(key.country_id)
            .bind(key.type_of_series.id())
            .fetch_optional(&self.pool)
            .await?;

        let series = match row {
            Some(row) => series_from_row(row)?,
            None => {
                return Err(Error::UnknownSeries {
                    variable_id: key.variable_id,
                    country_id: key.country_id,
                    type_of_series_id: key.type_of_series.id(),
                })
            }
        };
        if !series.active {
            return Err(Error::InactiveSeries {
                variable_id: key.variable_id,
                country_id: key.country_id,
                type_of_series_id: key.type_of_series.id(),
            });
        }
        Ok(series)
    }

    /// List active series matching the filter, ordered by identity.
    pub async fn list_active_series(&self, filter: &SeriesFilter) -> Result<Vec<Series>> {
        let mut sql = format!(
            "SELECT {} FROM master m \
             JOIN variable v ON v.id = m.variable_id \
             JOIN sub_family sf ON sf.id = v.sub_family_id \
             WHERE m.active = 1",
            SERIES_COLUMNS
        );
        if filter.periodicity.is_some() {
            sql.push_str(" AND m.periodicity = ?");
        }
        if filter.family.is_some() {
            sql.push_str(" AND sf.family_id = ?");
        }
        if filter.subfamily.is_some() {
            sql.push_str(" AND v.sub_family_id = ?");
        }
        if filter.country.is_some() {
            sql.push_str(" AND m.country_id = ?");
        }
        sql.push_str(" ORDER BY m.variable_id, m.country_id, m.type_of_series_id");

        let mut query = sqlx::query_as::<_, SeriesRow>(&sql);
        if let Some(p) = filter.periodicity {
            query = query.bind(p.code());
        }
        if let Some(f) = filter.family {
            query = query.bind(f);
        }
        if let Some(sf) = filter.subfamily {
            query = query.bind(sf);
        }
        if let Some(c) = filter.country {
            query = query.bind(c);
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(series_from_row).collect()
    }

    /// Series identified by a symbolic tag, active or not.
    pub async fn find_by_tag(&self, tag: &str) -> Result<Vec<Series>> {
        let sql = format!("SELECT {} FROM master m WHERE m.tag = ?", SERIES_COLUMNS);
        let rows = sqlx::query_as::<_, SeriesRow>(&sql)
            .bind(tag)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(series_from_row).collect()
    }

    pub async fn list_families(&self) -> Result<Vec<Family>> {
        let rows = sqlx::query_as::<_, (i64, String)>("SELECT id, name FROM family ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(id, name)| Family { id, name }).collect())
    }

    pub async fn list_sub_families(&self, family_id: i64) -> Result<Vec<SubFamily>> {
        let rows = sqlx::query_as::<_, (i64, i64, String)>(
            "SELECT id, family_id, name FROM sub_family WHERE family_id = ? ORDER BY id",
        )
        .bind(family_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, family_id, name)| SubFamily { id, family_id, name })
            .collect())
    }

    pub async fn list_variables(&self, sub_family_id: i64) -> Result<Vec<Variable>> {
        let rows = sqlx::query_as::<_, (i64, i64, String, Option<String>, i64)>(
            "SELECT id, sub_family_id, name, currency, is_real FROM variable \
             WHERE sub_family_id = ? ORDER BY id",
        )
        .bind(sub_family_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, sub_family_id, name, currency, is_real)| Variable {
                id,
                sub_family_id,
                name,
                currency,
                is_real: is_real != 0,
            })
            .collect())
    }

    pub async fn variable_name(&self, variable_id: i64) -> Result<Option<String>> {
        Ok(sqlx::query_scalar("SELECT name FROM variable WHERE id = ?")
            .bind(variable_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn country_name(&self, country_id: i64) -> Result<Option<String>> {
        Ok(sqlx::query_scalar("SELECT name FROM country WHERE id = ?")
            .bind(country_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    // -- bootstrap inserts --------------------------------------------------
    //
    // INSERT OR IGNORE keeps re-runs of the bootstrap harmless; existing rows
    // are left untouched except for the master active flag, which follows the
    // canonical workbook.

    pub async fn upsert_family(&self, id: i64, name: &str) -> Result<()> {
        sqlx::query("INSERT OR IGNORE INTO family (id, name) VALUES (?, ?)")
            .bind(id)
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn upsert_sub_family(&self, id: i64, family_id: i64, name: &str) -> Result<()> {
        sqlx::query("INSERT OR IGNORE INTO sub_family (id, family_id, name) VALUES (?, ?, ?)")
            .bind(id)
            .bind(family_id)
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn upsert_country(&self, id: i64, name: &str) -> Result<()> {
        sqlx::query("INSERT OR IGNORE INTO country (id, name) VALUES (?, ?)")
            .bind(id)
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn upsert_variable(&self, variable: &Variable) -> Result<()> {
        sqlx::query(
            "INSERT OR IGNORE INTO variable (id, sub_family_id, name, currency, is_real) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(variable.id)
        .bind(variable.sub_family_id)
        .bind(&variable.name)
        .bind(&variable.currency)
        .bind(variable.is_real)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn upsert_series(&self, series: &Series) -> Result<()> {
        let inserted = sqlx::query(
            "INSERT OR IGNORE INTO master \
             (variable_id, country_id, type_of_series_id, periodicity, source, source_url, tag, active) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(series.variable_id)
        .bind(series.country_id)
        .bind(series.type_of_series.id())
        .bind(series.periodicity.code())
        .bind(&series.source)
        .bind(&series.source_url)
        .bind(&series.tag)
        .bind(series.active)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if inserted == 0 {
            // Row already present: the workbook is authoritative for the
            // active flag, nothing else is rewritten.
            sqlx::query(
                "UPDATE master SET active = ? \
                 WHERE variable_id = ? AND country_id = ? AND type_of_series_id = ? AND periodicity = ?",
            )
            .bind(series.active)
            .bind(series.variable_id)
            .bind(series.country_id)
            .bind(series.type_of_series.id())
            .bind(series.periodicity.code())
            .execute(&self.pool)
            .await?;
        } else {
            info!("Catalog: registered series {}", series.key());
        }
        Ok(())
    }

    /// The catalog is usable once at least one active series exists.
    pub async fn is_bootstrapped(&self) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM master")
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    pub async fn ensure_type_of_series_seeded(&self) -> Result<()> {
        ensure_type_of_series_seeded(&self.pool).await
    }
}
