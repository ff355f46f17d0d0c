//! Where the device table comes from.
//!
//! The presentation layer only knows [`DeviceSource`]: "give me the current
//! device collection". A local file and the passthrough API are the two
//! implementations; both hand back a fresh, immutable [`DeviceCollection`]
//! that the caller swaps in whole.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::data::loader;
use crate::data::model::DeviceCollection;

/// The data collaborator could not supply a device collection.
///
/// Every variant means the filtering core never runs; the UI shows the
/// message and stays idle.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("File '{}' not found.", .0.display())]
    NotFound(PathBuf),

    #[error("Could not reach device API at {url}: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("Could not read device data from {origin}: {reason}")]
    Malformed { origin: String, reason: String },
}

/// Capability: supply the current device collection.
pub trait DeviceSource {
    /// Short human-readable origin, e.g. a path or URL.
    fn describe(&self) -> String;

    /// Load a complete, fresh snapshot.
    fn load(&self) -> Result<DeviceCollection, SourceError>;
}

// ---------------------------------------------------------------------------
// File-backed source
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DeviceSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<DeviceCollection, SourceError> {
        if !self.path.exists() {
            return Err(SourceError::NotFound(self.path.clone()));
        }
        loader::load_file(&self.path).map_err(|e| SourceError::Malformed {
            origin: self.describe(),
            reason: format!("{e:#}"),
        })
    }
}

// ---------------------------------------------------------------------------
// API-backed source
// ---------------------------------------------------------------------------

pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the raw table from a passthrough endpoint (`GET /get-devices`).
#[derive(Debug, Clone)]
pub struct ApiSource {
    url: String,
    timeout: Duration,
}

impl ApiSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    fn unreachable(&self, err: &reqwest::Error) -> SourceError {
        SourceError::Unreachable {
            url: self.url.clone(),
            reason: err.to_string(),
        }
    }
}

impl DeviceSource for ApiSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn load(&self) -> Result<DeviceCollection, SourceError> {
        log::debug!("fetching devices from {}", self.url);
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| self.unreachable(&e))?;
        let body = client
            .get(&self.url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::text)
            .map_err(|e| self.unreachable(&e))?;

        let collection =
            loader::parse_json_records(&body).map_err(|e| SourceError::Malformed {
                origin: self.describe(),
                reason: format!("{e:#}"),
            })?;
        log::info!("Fetched {} devices from {}", collection.len(), self.url);
        Ok(collection)
    }
}

// ---------------------------------------------------------------------------
// Selection from configuration
// ---------------------------------------------------------------------------

/// Which source the hosting process should read from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceConfig {
    File(PathBuf),
    Api { url: String, timeout: Duration },
}

pub fn open_source(config: &SourceConfig) -> Box<dyn DeviceSource> {
    match config {
        SourceConfig::File(path) => Box::new(FileSource::new(path.clone())),
        SourceConfig::Api { url, timeout } => Box::new(ApiSource::new(url.clone(), *timeout)),
    }
}
