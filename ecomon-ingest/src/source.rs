//! Source resolution: staged files, remote URLs, historical extracts
//!
//! The download stage deposits raw spreadsheets under the staging directory;
//! ingesters reference them by stable filename. For remote records the
//! staged fallback is authoritative whenever it exists, so a batch can run
//! fully offline against a staged snapshot.

use crate::registry::Source;
use ecomon_common::config::Config;
use ecomon_common::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Raw bytes plus the name they came from (used for format sniffing)
#[derive(Debug)]
pub struct RawSource {
    pub bytes: Vec<u8>,
    pub origin: String,
}

/// Resolves ingester sources to raw bytes
pub struct SourceReader {
    staging_dir: PathBuf,
    historical_dir: PathBuf,
    client: reqwest::Client,
}

impl SourceReader {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| Error::Config(format!("cannot build HTTP client: {}", e)))?;
        Ok(Self {
            staging_dir: config.staging_dir.clone(),
            historical_dir: config.historical_dir.clone(),
            client,
        })
    }

    pub async fn fetch(&self, source: &Source) -> Result<RawSource> {
        match source {
            Source::StagedFile(name) => self.read_file(&self.staging_dir, name),
            Source::HistoricalFile(name) => self.read_file(&self.historical_dir, name),
            Source::Url { url, fallback } => {
                // Staged file wins when both exist.
                if let Some(name) = fallback {
                    if self.staging_dir.join(name).exists() {
                        return self.read_file(&self.staging_dir, name);
                    }
                }
                match self.fetch_url(url).await {
                    Ok(raw) => Ok(raw),
                    Err(e) => {
                        // No fallback file on disk at this point; the error stands.
                        warn!("Remote read failed for {}: {}", url, e);
                        Err(e)
                    }
                }
            }
        }
    }

    fn read_file(&self, dir: &Path, name: &str) -> Result<RawSource> {
        let path = dir.join(name);
        if !path.exists() {
            return Err(Error::Source(format!("missing staged file: {}", path.display())));
        }
        let bytes = std::fs::read(&path)?;
        Ok(RawSource {
            bytes,
            origin: name.to_string(),
        })
    }

    async fn fetch_url(&self, url: &str) -> Result<RawSource> {
        info!("Fetching {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let err = format!("{} returned HTTP {}", url, status);
            return if status.is_server_error() {
                Err(Error::Transient(err))
            } else {
                Err(Error::Source(err))
            };
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_reqwest(url, e))?;
        Ok(RawSource {
            bytes: bytes.to_vec(),
            origin: url.to_string(),
        })
    }
}

/// Timeouts and connection failures are retried by the runner; anything
/// else about the request is a plain source failure.
fn classify_reqwest(url: &str, e: reqwest::Error) -> Error {
    if e.is_timeout() || e.is_connect() {
        Error::Transient(format!("{}: {}", url, e))
    } else {
        Error::Source(format!("{}: {}", url, e))
    }
}
