//! ecomon-ingest - Batch runner for the economic time-series warehouse
//!
//! Subcommands: run-all, run <selector>, clear-and-regenerate, bootstrap,
//! and the inspection commands. Exit codes: 0 all series succeeded, 1 at
//! least one ingester failed, 2 unrecoverable setup error.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use ecomon_common::config::{Config, ConfigOverrides};
use ecomon_common::db::{init_database, Catalog, ObservationStore, Periodicity, SeriesFilter};
use ecomon_common::Error;
use ecomon_ingest::source::SourceReader;
use ecomon_ingest::{bootstrap, inspect, runner, Loader, Registry, Selector};

/// Command-line arguments for ecomon-ingest
#[derive(Parser, Debug)]
#[command(name = "ecomon-ingest")]
#[command(about = "Ingestion batch runner for the economic time-series warehouse")]
#[command(version)]
struct Args {
    /// Database connection string (sqlite URL or file path)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Directory where the download stage deposits raw spreadsheets
    #[arg(long, env = "STAGING_DIR")]
    staging_dir: Option<PathBuf>,

    /// Directory holding one-shot multi-year extracts
    #[arg(long, env = "HISTORICAL_DIR")]
    historical_dir: Option<PathBuf>,

    /// Deadline for each remote read, in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECONDS")]
    http_timeout_seconds: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every active series
    RunAll,
    /// Run one series: variable_id:country_id[:type_of_series_id] or a tag
    Run { selector: String },
    /// Wipe all observations, then run every active series
    ClearAndRegenerate,
    /// Load the reference catalog from the canonical workbook
    Bootstrap { workbook: PathBuf },
    /// Read-only views over the catalog and the observation store
    Inspect {
        #[command(subcommand)]
        what: InspectCommand,
    },
}

#[derive(Subcommand, Debug)]
enum InspectCommand {
    /// Active series with observation counts and date ranges
    Series {
        /// Filter by periodicity (D, W, M)
        #[arg(long)]
        periodicity: Option<String>,
        /// Filter by country id
        #[arg(long)]
        country: Option<i64>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Daily series whose stored weekday calendar has holes
    MissingData {
        #[arg(long)]
        json: bool,
    },
    /// The family / sub-family / variable tree with series counts
    Categories {
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting ecomon-ingest v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    match run(args).await {
        Ok(any_failed) => {
            if any_failed {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether any ingester failed. Errors reaching the caller are
/// unrecoverable setup problems (exit 2).
async fn run(args: Args) -> anyhow::Result<bool> {
    let config = Config::resolve(ConfigOverrides {
        database_url: args.database_url,
        staging_dir: args.staging_dir,
        historical_dir: args.historical_dir,
        http_timeout_seconds: args.http_timeout_seconds,
    })?;

    let pool = init_database(&config.database_url).await?;
    let catalog = Catalog::new(pool.clone());

    match args.command {
        Command::Bootstrap { workbook } => {
            let report = bootstrap::bootstrap(&catalog, &workbook).await?;
            info!(
                "Catalog ready: {} series registered",
                report.series
            );
            Ok(false)
        }

        Command::RunAll => {
            let report = run_batch(&config, &pool, &Selector::All, false).await?;
            Ok(report.any_failed())
        }

        Command::Run { selector } => {
            let selector: Selector = selector.parse()?;
            let report = run_batch(&config, &pool, &selector, false).await?;
            Ok(report.any_failed())
        }

        Command::ClearAndRegenerate => {
            let report = run_batch(&config, &pool, &Selector::All, true).await?;
            Ok(report.any_failed())
        }

        Command::Inspect { what } => {
            run_inspect(&catalog, &ObservationStore::new(pool.clone()), what).await?;
            Ok(false)
        }
    }
}

async fn run_batch(
    config: &Config,
    pool: &sqlx::SqlitePool,
    selector: &Selector,
    wipe_first: bool,
) -> anyhow::Result<runner::BatchReport> {
    config.ensure_staging_dir()?;

    let catalog = Catalog::new(pool.clone());
    if !catalog.is_bootstrapped().await? {
        return Err(Error::Config(
            "catalog is empty; run `ecomon-ingest bootstrap <workbook>` first".to_string(),
        )
        .into());
    }

    let registry = Registry::standard();
    let selected = registry.select(selector);
    if selected.is_empty() {
        return Err(Error::Config(format!("selector matches no ingester: {:?}", selector)).into());
    }

    if wipe_first {
        let store = ObservationStore::new(pool.clone());
        let deleted = store.wipe().await?;
        info!("Cleared {} observations, regenerating all series", deleted);
    }

    let reader = SourceReader::new(config)?;
    let loader = Loader::new(pool);
    let report = runner::bulk_run(selected, &reader, &loader).await?;
    Ok(report)
}

async fn run_inspect(
    catalog: &Catalog,
    store: &ObservationStore,
    what: InspectCommand,
) -> anyhow::Result<()> {
    match what {
        InspectCommand::Series {
            periodicity,
            country,
            json,
        } => {
            let filter = SeriesFilter {
                periodicity: match periodicity.as_deref() {
                    None => None,
                    Some(code) => Some(Periodicity::from_code(code).ok_or_else(|| {
                        Error::Config(format!("unknown periodicity '{}'", code))
                    })?),
                },
                country,
                ..Default::default()
            };
            let rows = inspect::series_info(catalog, store, &filter).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in rows {
                    println!(
                        "{:>4}:{:<4} [{}] {:<28} {:<16} {:>7} obs  {} .. {}  {}",
                        row.variable_id,
                        row.country_id,
                        row.periodicity,
                        row.variable,
                        row.country,
                        row.observations,
                        fmt_date(row.first_date),
                        fmt_date(row.last_date),
                        row.tag.unwrap_or_default(),
                    );
                }
            }
        }
        InspectCommand::MissingData { json } => {
            let rows = inspect::missing_data(catalog, store).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else if rows.is_empty() {
                println!("All daily series are dense over their stored range.");
            } else {
                for row in rows {
                    println!(
                        "{:<20} {:<28} {:<16} {:>7} of {:>7} weekdays ({} missing)",
                        row.tag.unwrap_or_default(),
                        row.variable,
                        row.country,
                        row.observations,
                        row.expected,
                        row.missing,
                    );
                }
            }
        }
        InspectCommand::Categories { json } => {
            let tree = inspect::categories(catalog).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tree)?);
            } else {
                for family in tree.families {
                    println!("{} {}", family.id, family.name);
                    for sub in family.sub_families {
                        println!("  {} {}", sub.id, sub.name);
                        for v in sub.variables {
                            println!("    {} {} ({} active series)", v.id, v.name, v.active_series);
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

fn fmt_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}
