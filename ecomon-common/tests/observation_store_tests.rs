//! Observation store tests: upsert semantics, counts, ranges, clearing

mod common;

use chrono::NaiveDate;
use common::seed_catalog;
use ecomon_common::db::{init_database, ObservationStore, SeriesKey};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

const KEY: fn() -> SeriesKey = || SeriesKey::original(11, 858);

#[tokio::test]
async fn upsert_inserts_then_updates() {
    let pool = init_database("sqlite::memory:").await.unwrap();
    seed_catalog(&pool).await;
    let store = ObservationStore::new(pool);

    let rows = vec![(d(2024, 1, 1), 100.0), (d(2024, 2, 1), 100.8)];
    let counts = store.upsert_many(KEY(), &rows).await.unwrap();
    assert_eq!((counts.inserted, counts.updated), (2, 0));
    assert_eq!(store.count_for(KEY()).await.unwrap(), 2);

    // Same dates, one changed value: both count as updated, row count stable
    let rows = vec![(d(2024, 1, 1), 100.0), (d(2024, 2, 1), 101.0)];
    let counts = store.upsert_many(KEY(), &rows).await.unwrap();
    assert_eq!((counts.inserted, counts.updated), (0, 2));
    assert_eq!(store.count_for(KEY()).await.unwrap(), 2);

    let stored = store.fetch_all(KEY()).await.unwrap();
    assert_eq!(stored[1], (d(2024, 2, 1), 101.0));
}

#[tokio::test]
async fn upsert_of_empty_rows_is_a_noop() {
    let pool = init_database("sqlite::memory:").await.unwrap();
    seed_catalog(&pool).await;
    let store = ObservationStore::new(pool);

    let counts = store.upsert_many(KEY(), &[]).await.unwrap();
    assert_eq!((counts.inserted, counts.updated), (0, 0));
    assert_eq!(store.count_for(KEY()).await.unwrap(), 0);
}

#[tokio::test]
async fn range_for_reports_min_and_max() {
    let pool = init_database("sqlite::memory:").await.unwrap();
    seed_catalog(&pool).await;
    let store = ObservationStore::new(pool);

    assert_eq!(store.range_for(KEY()).await.unwrap(), None);

    let rows = vec![
        (d(2024, 1, 1), 1.0),
        (d(2024, 3, 1), 3.0),
        (d(2024, 2, 1), 2.0),
    ];
    store.upsert_many(KEY(), &rows).await.unwrap();
    assert_eq!(
        store.range_for(KEY()).await.unwrap(),
        Some((d(2024, 1, 1), d(2024, 3, 1)))
    );
}

#[tokio::test]
async fn delete_all_for_clears_only_that_series() {
    let pool = init_database("sqlite::memory:").await.unwrap();
    seed_catalog(&pool).await;
    let store = ObservationStore::new(pool);
    let other = SeriesKey::original(21, 858);

    store
        .upsert_many(KEY(), &[(d(2024, 1, 1), 1.0)])
        .await
        .unwrap();
    store
        .upsert_many(other, &[(d(2024, 1, 1), 38.5)])
        .await
        .unwrap();

    let deleted = store.delete_all_for(KEY()).await.unwrap();
    assert_eq!(deleted, 1);
    assert_eq!(store.count_for(KEY()).await.unwrap(), 0);
    assert_eq!(store.count_for(other).await.unwrap(), 1);
}

#[tokio::test]
async fn replace_all_swaps_contents_in_one_call() {
    let pool = init_database("sqlite::memory:").await.unwrap();
    seed_catalog(&pool).await;
    let store = ObservationStore::new(pool);

    let old: Vec<_> = (1..=28).map(|day| (d(2024, 1, day), day as f64)).collect();
    store.upsert_many(KEY(), &old).await.unwrap();
    assert_eq!(store.count_for(KEY()).await.unwrap(), 28);

    let new: Vec<_> = (1..=10).map(|day| (d(2024, 2, day), day as f64)).collect();
    let counts = store.replace_all(KEY(), &new).await.unwrap();
    assert_eq!(counts.inserted, 10);
    assert_eq!(store.count_for(KEY()).await.unwrap(), 10);
    assert_eq!(
        store.range_for(KEY()).await.unwrap(),
        Some((d(2024, 2, 1), d(2024, 2, 10)))
    );
}
