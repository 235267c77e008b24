//! Batch runner tests: end-to-end pipeline from staged files to the store,
//! partial failure reporting

mod common;

use chrono::NaiveDate;
use common::{seed_catalog, stage_file, test_config, test_pool};
use ecomon_common::db::Periodicity;
use ecomon_common::Error;
use ecomon_ingest::registry::Source;
use ecomon_ingest::runner::{bulk_run, SeriesStatus};
use ecomon_ingest::source::SourceReader;
use ecomon_ingest::{IngesterSpec, Loader};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn monthly_cpi_spec() -> IngesterSpec {
    IngesterSpec::new(
        "ipc_uy",
        11,
        858,
        Periodicity::Monthly,
        Source::StagedFile("ipc.csv"),
    )
    .skip(1)
    .cols(0, 1)
}

fn daily_fx_spec() -> IngesterSpec {
    IngesterSpec::new(
        "tc_usd_uy",
        21,
        858,
        Periodicity::Daily,
        Source::StagedFile("tc.csv"),
    )
    .skip(1)
    .cols(0, 1)
    .decimal_comma()
    .fill_business_days()
}

#[tokio::test]
async fn daily_fx_pipeline_fills_business_days() {
    let pool = test_pool().await;
    seed_catalog(&pool).await;
    let dir = tempfile::tempdir().unwrap();
    stage_file(
        dir.path(),
        "tc.csv",
        "fecha,venta\n2024-06-03,\"38,50\"\n2024-06-05,\"38,65\"\n2024-06-07,\"38,80\"\n",
    );

    let reader = SourceReader::new(&test_config(dir.path())).unwrap();
    let loader = Loader::new(&pool);
    let spec = daily_fx_spec();

    let report = bulk_run([&spec], &reader, &loader).await.unwrap();
    assert_eq!(report.loaded(), 1);

    let stored = loader.store().fetch_all(spec.key()).await.unwrap();
    assert_eq!(
        stored,
        vec![
            (d(2024, 6, 3), 38.50),
            (d(2024, 6, 4), 38.50),
            (d(2024, 6, 5), 38.65),
            (d(2024, 6, 6), 38.65),
            (d(2024, 6, 7), 38.80),
        ]
    );
}

#[tokio::test]
async fn batch_continues_past_a_missing_source() {
    let pool = test_pool().await;
    seed_catalog(&pool).await;
    let dir = tempfile::tempdir().unwrap();
    stage_file(dir.path(), "ipc.csv", "fecha,indice\n2024-01-31,100.0\n");
    stage_file(dir.path(), "tc.csv", "fecha,venta\n2024-06-03,\"38,50\"\n");
    // No file staged for tc_ars

    let missing_spec = IngesterSpec::new(
        "tc_ars",
        21,
        32,
        Periodicity::Daily,
        Source::StagedFile("no_such_file.csv"),
    );

    let specs = [monthly_cpi_spec(), missing_spec, daily_fx_spec()];
    let reader = SourceReader::new(&test_config(dir.path())).unwrap();
    let loader = Loader::new(&pool);

    let report = bulk_run(specs.iter(), &reader, &loader).await.unwrap();
    assert_eq!(report.loaded(), 2);
    assert_eq!(report.failed(), 1);
    assert!(report.any_failed());

    let statuses: Vec<_> = report
        .outcomes
        .iter()
        .map(|(tag, status)| (*tag, status))
        .collect();
    assert!(matches!(
        statuses[1],
        ("tc_ars", SeriesStatus::Failed(Error::Source(_)))
    ));
    assert!(matches!(statuses[0], ("ipc_uy", SeriesStatus::Loaded(_))));
    assert!(matches!(statuses[2], ("tc_usd_uy", SeriesStatus::Loaded(_))));
}

#[tokio::test]
async fn unknown_identity_is_recorded_not_fatal() {
    let pool = test_pool().await;
    seed_catalog(&pool).await;
    let dir = tempfile::tempdir().unwrap();
    stage_file(dir.path(), "ipc.csv", "fecha,indice\n2024-01-31,100.0\n");

    let rogue = IngesterSpec::new(
        "rogue",
        9999,
        1,
        Periodicity::Monthly,
        Source::StagedFile("ipc.csv"),
    )
    .skip(1);

    let reader = SourceReader::new(&test_config(dir.path())).unwrap();
    let loader = Loader::new(&pool);

    let report = bulk_run([&rogue], &reader, &loader).await.unwrap();
    assert_eq!(report.failed(), 1);
    assert!(matches!(
        report.outcomes[0].1,
        SeriesStatus::Failed(Error::UnknownSeries { .. })
    ));
}

#[tokio::test]
async fn rerunning_a_batch_is_idempotent() {
    let pool = test_pool().await;
    seed_catalog(&pool).await;
    let dir = tempfile::tempdir().unwrap();
    stage_file(
        dir.path(),
        "ipc.csv",
        "fecha,indice\n2024-01-31,100.0\n2024-02-29,100.8\n",
    );

    let reader = SourceReader::new(&test_config(dir.path())).unwrap();
    let loader = Loader::new(&pool);
    let spec = monthly_cpi_spec();

    bulk_run([&spec], &reader, &loader).await.unwrap();
    let first = loader.store().fetch_all(spec.key()).await.unwrap();

    let report = bulk_run([&spec], &reader, &loader).await.unwrap();
    let second = loader.store().fetch_all(spec.key()).await.unwrap();

    assert_eq!(first, second);
    match &report.outcomes[0].1 {
        SeriesStatus::Loaded(load) => {
            assert_eq!(load.inserted, 0);
            assert_eq!(load.updated, 2);
        }
        other => panic!("expected Loaded, got {:?}", other),
    }
}

#[tokio::test]
async fn staged_fallback_is_authoritative_over_the_url() {
    let pool = test_pool().await;
    seed_catalog(&pool).await;
    let dir = tempfile::tempdir().unwrap();
    stage_file(dir.path(), "tc_snapshot.csv", "fecha,venta\n2024-06-03,38.50\n");

    // The URL is unreachable; the staged snapshot must win without a fetch.
    let spec = IngesterSpec::new(
        "tc_usd_uy",
        21,
        858,
        Periodicity::Daily,
        Source::Url {
            url: "http://127.0.0.1:1/never",
            fallback: Some("tc_snapshot.csv"),
        },
    )
    .skip(1)
    .cols(0, 1);

    let reader = SourceReader::new(&test_config(dir.path())).unwrap();
    let loader = Loader::new(&pool);

    let report = bulk_run([&spec], &reader, &loader).await.unwrap();
    assert_eq!(report.loaded(), 1);
    assert_eq!(loader.store().count_for(spec.key()).await.unwrap(), 1);
}

#[tokio::test]
async fn dirty_rows_drop_below_threshold_and_load_proceeds() {
    let pool = test_pool().await;
    seed_catalog(&pool).await;
    let dir = tempfile::tempdir().unwrap();
    // One "n/d" row among valid ones: dropped with a warning, not fatal
    stage_file(
        dir.path(),
        "ipc.csv",
        "fecha,indice\n2024-01-31,100.0\n2024-02-29,n/d\n2024-03-31,101.5\n",
    );

    let reader = SourceReader::new(&test_config(dir.path())).unwrap();
    let loader = Loader::new(&pool);
    let spec = monthly_cpi_spec();

    let report = bulk_run([&spec], &reader, &loader).await.unwrap();
    assert_eq!(report.loaded(), 1);
    assert_eq!(loader.store().count_for(spec.key()).await.unwrap(), 2);
}
