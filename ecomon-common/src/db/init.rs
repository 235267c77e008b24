//! Database initialization
//!
//! Creates the schema on first run and is safe to call on every startup:
//! all statements are `CREATE TABLE IF NOT EXISTS` / `INSERT OR IGNORE`.

use crate::{Error, Result};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize the database connection and create tables if needed.
///
/// `database_url` is either a `sqlite:` connection string or a plain
/// filesystem path.
pub async fn init_database(database_url: &str) -> Result<SqlitePool> {
    let url = if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else {
        let path = Path::new(database_url);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        format!("sqlite://{}?mode=rwc", path.display())
    };

    // The Loader holds exclusive write access for the duration of a batch;
    // one connection keeps the single-writer contract honest.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .map_err(|e| Error::Config(format!("cannot open database {}: {}", database_url, e)))?;

    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;
    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    create_family_table(&pool).await?;
    create_sub_family_table(&pool).await?;
    create_country_table(&pool).await?;
    create_variable_table(&pool).await?;
    create_type_of_series_table(&pool).await?;
    create_master_table(&pool).await?;
    create_observations_table(&pool).await?;

    crate::db::catalog::ensure_type_of_series_seeded(&pool).await?;

    info!("Database ready: {}", database_url);
    Ok(pool)
}

async fn create_family_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS family (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_sub_family_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sub_family (
            id INTEGER PRIMARY KEY,
            family_id INTEGER NOT NULL REFERENCES family(id),
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sub_family_family ON sub_family(family_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_country_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS country (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_variable_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS variable (
            id INTEGER PRIMARY KEY,
            sub_family_id INTEGER NOT NULL REFERENCES sub_family(id),
            name TEXT NOT NULL,
            currency TEXT,
            is_real INTEGER NOT NULL DEFAULT 0,
            CHECK (is_real IN (0, 1))
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_variable_sub_family ON variable(sub_family_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_type_of_series_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS type_of_series (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// The `master` table materializes the set of ingestible series. Identity is
/// the natural tuple; there is no surrogate id.
async fn create_master_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS master (
            variable_id INTEGER NOT NULL REFERENCES variable(id),
            country_id INTEGER NOT NULL REFERENCES country(id),
            type_of_series_id INTEGER NOT NULL DEFAULT 1 REFERENCES type_of_series(id),
            periodicity TEXT NOT NULL CHECK (periodicity IN ('D', 'W', 'M')),
            source TEXT,
            source_url TEXT,
            tag TEXT,
            active INTEGER NOT NULL DEFAULT 1 CHECK (active IN (0, 1)),
            UNIQUE (variable_id, country_id, type_of_series_id, periodicity)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_master_country ON master(country_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_master_tag ON master(tag)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_observations_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS observations (
            variable_id INTEGER NOT NULL,
            country_id INTEGER NOT NULL,
            type_of_series_id INTEGER NOT NULL DEFAULT 1,
            date TEXT NOT NULL,
            value REAL NOT NULL,
            UNIQUE (variable_id, country_id, type_of_series_id, date)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_observations_series ON observations(variable_id, country_id, type_of_series_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
