//! Log setup
//!
//! The terminal belongs to the game UI while it runs, so log lines go to a
//! file. The filter comes from `RUST_LOG` and defaults to `info`.

use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("retro_snake.log")
}

/// Install the global subscriber, appending to `path`
pub fn init(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| anyhow!("Failed to install log subscriber: {err}"))
}
