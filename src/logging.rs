//! src/logging.rs
//!
//! The terminal belongs to the dashboard, so tracing output goes to a file.
//! Set `QPS_MONITOR_LOG=<path>` to enable it; `RUST_LOG` picks the filter
//! (default `info`). Without the variable nothing is installed.

use std::fs::OpenOptions;
use std::sync::Mutex;

use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing_subscriber::EnvFilter;

pub const LOG_PATH_ENV: &str = "QPS_MONITOR_LOG";

pub fn init() -> Result<()> {
    let Ok(path) = std::env::var(LOG_PATH_ENV) else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("opening log file {}", path))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| eyre!("installing tracing subscriber: {}", e))?;
    Ok(())
}
