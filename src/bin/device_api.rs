use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use fl_device_selector::api;
use fl_device_selector::source::{DeviceSource, FileSource};

/// Serve the raw device table at `GET /get-devices`.
#[derive(Parser, Debug)]
#[command(name = "device-api", version)]
struct Args {
    /// Device table to publish (.csv, .json, .parquet or .xlsx)
    #[arg(long, env = "FL_DEVICES_FILE", default_value = "data/devices.csv")]
    file: PathBuf,

    /// Address to listen on
    #[arg(long, env = "FL_API_BIND", default_value = "127.0.0.1:8000")]
    bind: String,

    /// Number of request-handling threads
    #[arg(long, default_value_t = 4)]
    workers: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let source = FileSource::new(&args.file);
    let snapshot = Arc::new(source.load().context("loading device table")?);

    let server = tiny_http::Server::http(&args.bind)
        .map_err(|e| anyhow!("Failed to bind {}: {e}", args.bind))?;
    log::info!(
        "Serving {} devices from {} at http://{}{}",
        snapshot.len(),
        source.describe(),
        args.bind,
        api::DEVICES_PATH
    );

    for worker in api::serve(Arc::new(server), snapshot, args.workers) {
        if worker.join().is_err() {
            log::error!("api worker panicked");
        }
    }
    Ok(())
}
