use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use fl_device_selector::source::{SourceConfig, DEFAULT_API_TIMEOUT};

#[derive(Parser, Debug)]
#[command(name = "fl-device-selector")]
#[command(about = "Select federated-learning client devices by hardware requirements", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Device table to load (.csv, .json, .parquet or .xlsx)
    #[arg(long, env = "FL_DEVICES_FILE", default_value = "data/devices.csv")]
    pub file: PathBuf,

    /// Fetch the device table from a passthrough endpoint instead of a file,
    /// e.g. http://127.0.0.1:8000/get-devices
    #[arg(long, env = "FL_DEVICES_API")]
    pub api: Option<String>,

    /// Timeout for API requests, in seconds
    #[arg(long, default_value_t = DEFAULT_API_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
}

impl Cli {
    /// `--api` wins over `--file` when both are given.
    pub fn source_config(&self) -> SourceConfig {
        match &self.api {
            Some(url) => SourceConfig::Api {
                url: url.clone(),
                timeout: Duration::from_secs(self.timeout_secs),
            },
            None => SourceConfig::File(self.file.clone()),
        }
    }
}
