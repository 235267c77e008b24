//! Sequential batch runner
//!
//! Runs one series at a time through the pipeline
//! `Pending -> Reading -> Normalized -> Writing -> {Loaded | Skipped | Failed}`.
//! A failed ingester is recorded and never aborts the batch; transient
//! failures are retried with exponential backoff before being recorded.

use crate::extract::extract;
use crate::loader::{LoadReport, Loader};
use crate::registry::{Fill, IngesterSpec};
use crate::source::SourceReader;
use ecomon_common::db::Periodicity;
use ecomon_common::normalize::{
    coerce_numeric, fill_business_days, normalize_monthly, parse_dates, validate_dates,
    DateOptions, NumericOptions,
};
use ecomon_common::{Error, Frame, Result};
use std::time::Duration;
use tracing::{error, info, warn};

/// Retry schedule for transient failures, per ingester
const BACKOFF: [Duration; 3] = [
    Duration::from_secs(1),
    Duration::from_secs(3),
    Duration::from_secs(9),
];

/// Terminal state of one ingestion attempt
#[derive(Debug)]
pub enum SeriesStatus {
    Loaded(LoadReport),
    /// The catalog row is deactivated, or the frame normalized to nothing
    Skipped(String),
    Failed(Error),
}

/// Per-series outcomes of one batch
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<(&'static str, SeriesStatus)>,
}

impl BatchReport {
    pub fn record(&mut self, tag: &'static str, status: SeriesStatus) {
        self.outcomes.push((tag, status));
    }

    pub fn loaded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, s)| matches!(s, SeriesStatus::Loaded(_)))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, s)| matches!(s, SeriesStatus::Skipped(_)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, s)| matches!(s, SeriesStatus::Failed(_)))
            .count()
    }

    pub fn any_failed(&self) -> bool {
        self.failed() > 0
    }

    pub fn log_summary(&self) {
        info!(
            "Batch finished: {} loaded, {} skipped, {} failed of {} series",
            self.loaded(),
            self.skipped(),
            self.failed(),
            self.outcomes.len()
        );
        for (tag, status) in &self.outcomes {
            match status {
                SeriesStatus::Loaded(report) => info!("  {} -> {}", tag, report),
                SeriesStatus::Skipped(reason) => info!("  {} -> skipped: {}", tag, reason),
                SeriesStatus::Failed(e) => error!("  {} -> failed: {}", tag, e),
            }
        }
    }
}

/// Run the declared normalization pipeline over a projected raw frame.
fn normalize(spec: &IngesterSpec, raw: ecomon_common::RawFrame) -> Result<Frame> {
    let dated = parse_dates(
        &raw,
        &DateOptions {
            day_first: spec.day_first,
            ..Default::default()
        },
    )?;
    let coerced = coerce_numeric(
        dated,
        &NumericOptions {
            decimal_comma: spec.decimal_comma,
        },
    )?;
    let frame = validate_dates(coerced.frame);

    match (spec.periodicity, spec.fill) {
        (Periodicity::Monthly, _) => Ok(normalize_monthly(frame)),
        (Periodicity::Daily, Fill::BusinessDays) => fill_business_days(frame, true),
        _ => Ok(frame),
    }
}

/// One ingestion attempt, staged: read, extract, normalize, load.
async fn attempt(spec: &IngesterSpec, reader: &SourceReader, loader: &Loader) -> Result<LoadReport> {
    let raw = reader.fetch(&spec.source).await?;
    let projected = extract(&raw, spec)?;
    let frame = normalize(spec, projected)?;
    loader.load(spec.key(), &frame).await
}

/// Run one ingester, retrying transient failures up to three times.
pub async fn run_ingester(
    spec: &IngesterSpec,
    reader: &SourceReader,
    loader: &Loader,
) -> Result<LoadReport> {
    let mut backoff = BACKOFF.iter();
    loop {
        match attempt(spec, reader, loader).await {
            Err(e) if e.is_transient() => match backoff.next() {
                Some(delay) => {
                    warn!("{}: transient failure ({}), retrying in {:?}", spec.tag, e, delay);
                    tokio::time::sleep(*delay).await;
                }
                None => return Err(e),
            },
            other => return other,
        }
    }
}

/// Run the selected ingesters sequentially, collecting per-series outcomes.
///
/// Configuration errors propagate immediately; everything else is recorded
/// against the series and the batch continues.
pub async fn bulk_run<'a, I>(specs: I, reader: &SourceReader, loader: &Loader) -> Result<BatchReport>
where
    I: IntoIterator<Item = &'a IngesterSpec>,
{
    let mut report = BatchReport::default();

    for spec in specs {
        info!("Running {} ({})", spec.tag, spec.key());
        match run_ingester(spec, reader, loader).await {
            Ok(load) if load.written() == 0 && load.skipped == 0 => {
                report.record(spec.tag, SeriesStatus::Skipped("empty frame".to_string()));
            }
            Ok(load) => report.record(spec.tag, SeriesStatus::Loaded(load)),
            Err(Error::InactiveSeries { .. }) => {
                report.record(spec.tag, SeriesStatus::Skipped("series inactive".to_string()));
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                error!("{} failed: {}", spec.tag, e);
                report.record(spec.tag, SeriesStatus::Failed(e));
            }
        }
    }

    report.log_summary();
    Ok(report)
}
