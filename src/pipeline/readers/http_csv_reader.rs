// src/pipeline/readers/http_csv_reader.rs

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info, warn};

use crate::config::LoaderSettings;
use crate::data_model::Split;
use crate::error::{DatasetError, Result};
use crate::pipeline::readers::base_reader::{read_rows, CsvFetcher, SplitRows};

/// Fetches CSV over HTTP(S), or from disk for any locator that is not a URL.
#[derive(Debug)]
pub struct HttpCsvFetcher {
    settings: LoaderSettings,
    client: Client,
}

impl HttpCsvFetcher {
    pub fn new(settings: LoaderSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| {
                DatasetError::ConfigError(format!("Failed to build HTTP client: {}", e))
            })?;
        Ok(HttpCsvFetcher { settings, client })
    }

    pub fn settings(&self) -> &LoaderSettings {
        &self.settings
    }

    /// Where a download of `locator` is cached, if caching is enabled.
    ///
    /// The file name is the percent-encoded locator, so distinct locators never share a file.
    pub fn cache_path(&self, locator: &str) -> Option<PathBuf> {
        let dir = self.settings.cache_dir.as_ref()?;
        Some(dir.join(format!("{}.csv", urlencoding::encode(locator))))
    }

    fn download(&self, locator: &str) -> Result<Vec<u8>> {
        let cache_path = self.cache_path(locator);
        if let Some(path) = &cache_path {
            if path.exists() && !self.settings.force_download {
                debug!(locator, path = %path.display(), "Using cached download");
                return fs::read(path).map_err(|e| DatasetError::unavailable(locator, e));
            }
        }

        info!(locator, "Downloading CSV");
        let body = self
            .client
            .get(locator)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.bytes())
            .map_err(|e| DatasetError::unavailable(locator, e))?
            .to_vec();

        if let Some(path) = &cache_path {
            match store_in_cache(path, &body) {
                Ok(()) => debug!(path = %path.display(), bytes = body.len(), "Cached download"),
                Err(e) => warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to cache download; continuing without cache"
                ),
            }
        }
        Ok(body)
    }

    fn read_body(&self, locator: &str) -> Result<Vec<u8>> {
        if is_url(locator) {
            self.download(locator)
        } else {
            debug!(locator, "Reading local CSV");
            fs::read(locator).map_err(|e| DatasetError::unavailable(locator, e))
        }
    }
}

impl CsvFetcher for HttpCsvFetcher {
    fn fetch_csv(&self, locator: &str, column_names: &[&str]) -> Result<SplitRows> {
        let body = self.read_body(locator)?;
        let rows = read_rows(
            body.as_slice(),
            self.settings.delimiter_byte(),
            column_names.len(),
        )?;
        info!(locator, rows = rows.len(), "Fetched CSV");

        // A single data file always lands in the train split.
        let mut splits = SplitRows::new();
        splits.insert(Split::Train.as_str(), rows);
        Ok(splits)
    }
}

// Writes next to the target and renames, so a crash never leaves a truncated cache file.
fn store_in_cache(path: &Path, body: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, body)?;
    fs::rename(&tmp_path, path)
}

pub fn is_url(locator: &str) -> bool {
    locator.starts_with("http://") || locator.starts_with("https://")
}
