//! Shared fixtures: in-memory catalog seed and a staged-file workspace

#![allow(dead_code)]

use ecomon_common::config::Config;
use ecomon_common::db::{
    init_database, Catalog, Periodicity, Series, TypeOfSeries, Variable,
};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;

pub async fn test_pool() -> SqlitePool {
    init_database("sqlite::memory:").await.unwrap()
}

/// Catalog with the identities the tests load into.
pub async fn seed_catalog(pool: &SqlitePool) -> Catalog {
    let catalog = Catalog::new(pool.clone());

    catalog.upsert_family(1, "Prices").await.unwrap();
    catalog.upsert_family(2, "Exchange rates").await.unwrap();
    catalog.upsert_sub_family(11, 1, "Consumer prices").await.unwrap();
    catalog.upsert_sub_family(21, 2, "Spot rates").await.unwrap();
    catalog.upsert_country(858, "Uruguay").await.unwrap();
    catalog.upsert_country(32, "Argentina").await.unwrap();
    catalog.upsert_country(76, "Brazil").await.unwrap();

    for (id, sub, name) in [(11, 11, "IPC"), (21, 21, "Exchange rate USD")] {
        catalog
            .upsert_variable(&Variable {
                id,
                sub_family_id: sub,
                name: name.to_string(),
                currency: None,
                is_real: false,
            })
            .await
            .unwrap();
    }

    let series = |variable_id, country_id, periodicity, tag: &str| Series {
        variable_id,
        country_id,
        type_of_series: TypeOfSeries::Original,
        periodicity,
        source: None,
        source_url: None,
        tag: Some(tag.to_string()),
        active: true,
    };
    catalog
        .upsert_series(&series(11, 858, Periodicity::Monthly, "ipc_uy"))
        .await
        .unwrap();
    catalog
        .upsert_series(&series(21, 858, Periodicity::Daily, "tc_usd_uy"))
        .await
        .unwrap();
    catalog
        .upsert_series(&series(21, 32, Periodicity::Daily, "tc_ars"))
        .await
        .unwrap();
    catalog
        .upsert_series(&series(21, 76, Periodicity::Daily, "tc_brl"))
        .await
        .unwrap();

    catalog
}

/// Config rooted at a temp dir that serves as both staging and historical.
pub fn test_config(dir: &Path) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        staging_dir: dir.to_path_buf(),
        historical_dir: dir.to_path_buf(),
        http_timeout: Duration::from_secs(5),
    }
}

pub fn stage_file(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}
