//! Shared catalog fixture for store tests

use ecomon_common::db::{Catalog, Periodicity, Series, TypeOfSeries, Variable};
use sqlx::SqlitePool;

pub async fn seed_catalog(pool: &SqlitePool) -> Catalog {
    let catalog = Catalog::new(pool.clone());

    catalog.upsert_family(1, "Prices").await.unwrap();
    catalog.upsert_family(2, "Exchange rates").await.unwrap();
    catalog.upsert_sub_family(11, 1, "Consumer prices").await.unwrap();
    catalog.upsert_sub_family(21, 2, "Spot rates").await.unwrap();
    catalog.upsert_country(858, "Uruguay").await.unwrap();
    catalog.upsert_country(32, "Argentina").await.unwrap();

    catalog
        .upsert_variable(&Variable {
            id: 11,
            sub_family_id: 11,
            name: "IPC".to_string(),
            currency: None,
            is_real: false,
        })
        .await
        .unwrap();
    catalog
        .upsert_variable(&Variable {
            id: 21,
            sub_family_id: 21,
            name: "Exchange rate USD".to_string(),
            currency: Some("UYU".to_string()),
            is_real: false,
        })
        .await
        .unwrap();

    catalog
        .upsert_series(&Series {
            variable_id: 11,
            country_id: 858,
            type_of_series: TypeOfSeries::Original,
            periodicity: Periodicity::Monthly,
            source: Some("INE".to_string()),
            source_url: None,
            tag: Some("ipc_uy".to_string()),
            active: true,
        })
        .await
        .unwrap();
    catalog
        .upsert_series(&Series {
            variable_id: 21,
            country_id: 858,
            type_of_series: TypeOfSeries::Original,
            periodicity: Periodicity::Daily,
            source: Some("BCU".to_string()),
            source_url: None,
            tag: Some("tc_usd_uy".to_string()),
            active: true,
        })
        .await
        .unwrap();
    catalog
        .upsert_series(&Series {
            variable_id: 21,
            country_id: 32,
            type_of_series: TypeOfSeries::Original,
            periodicity: Periodicity::Daily,
            source: Some("BCRA".to_string()),
            source_url: None,
            tag: Some("tc_ars".to_string()),
            active: false,
        })
        .await
        .unwrap();

    catalog
}
