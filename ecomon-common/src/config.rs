//! Configuration loading and resolution
//!
//! Values resolve in priority order:
//! 1. Command-line argument (clap also maps the environment variable)
//! 2. TOML config file (`~/.config/ecomon/config.toml`)
//! 3. Compiled default
//!
//! `database_url` has no compiled default; a run without one is a
//! configuration error.

use crate::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_STAGING_DIR: &str = "./staging";
const DEFAULT_HISTORICAL_DIR: &str = "./historical";
const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 60;

/// Resolved process configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub staging_dir: PathBuf,
    pub historical_dir: PathBuf,
    pub http_timeout: Duration,
}

/// Values captured from the command line (and environment, via clap)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub database_url: Option<String>,
    pub staging_dir: Option<PathBuf>,
    pub historical_dir: Option<PathBuf>,
    pub http_timeout_seconds: Option<u64>,
}

impl Config {
    /// Resolve the full configuration from overrides, config file, and defaults.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        let file = ConfigFile::load();

        let database_url = overrides
            .database_url
            .or_else(|| file.as_ref().and_then(|f| f.database_url.clone()))
            .ok_or_else(|| {
                Error::Config(
                    "database URL not set (use --database-url or DATABASE_URL)".to_string(),
                )
            })?;

        let staging_dir = overrides
            .staging_dir
            .or_else(|| file.as_ref().and_then(|f| f.staging_dir.clone()))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STAGING_DIR));

        let historical_dir = overrides
            .historical_dir
            .or_else(|| file.as_ref().and_then(|f| f.historical_dir.clone()))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORICAL_DIR));

        let timeout_seconds = overrides
            .http_timeout_seconds
            .or_else(|| file.as_ref().and_then(|f| f.http_timeout_seconds))
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECONDS);

        Ok(Config {
            database_url,
            staging_dir,
            historical_dir,
            http_timeout: Duration::from_secs(timeout_seconds),
        })
    }

    /// Staging directory must exist before a batch may run.
    pub fn ensure_staging_dir(&self) -> Result<()> {
        if !self.staging_dir.is_dir() {
            return Err(Error::Config(format!(
                "staging directory not found: {}",
                self.staging_dir.display()
            )));
        }
        Ok(())
    }
}

/// Optional on-disk configuration, deserialized from TOML
#[derive(Debug, serde::Deserialize)]
struct ConfigFile {
    database_url: Option<String>,
    staging_dir: Option<PathBuf>,
    historical_dir: Option<PathBuf>,
    http_timeout_seconds: Option<u64>,
}

impl ConfigFile {
    fn load() -> Option<Self> {
        let path = Self::path()?;
        let content = std::fs::read_to_string(&path).ok()?;
        match toml::from_str(&content) {
            Ok(file) => Some(file),
            Err(e) => {
                tracing::warn!("Ignoring malformed config file {}: {}", path.display(), e);
                None
            }
        }
    }

    fn path() -> Option<PathBuf> {
        let path = dirs::config_dir()?.join("ecomon").join("config.toml");
        path.exists().then_some(path)
    }
}
