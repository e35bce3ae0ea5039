use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use crate::constants::env;

/// Tracing for full-screen frontends.
///
/// Stdout belongs to the terminal UI, so events only go to a file, and only
/// when `PARLEY_LOG_FILE` names one. Without it, tracing stays silent.
pub fn init_file_tracing(service_name: &str) -> Result<()> {
    let Some(log_path) = std::env::var(env::LOG_FILE).ok().filter(|p| !p.is_empty()) else {
        return Ok(());
    };
    let log_path = Path::new(&log_path);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_filter(LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(service = service_name, "file logging enabled");
    Ok(())
}

/// Tracing for headless services: human-readable events on stderr
pub fn init_stderr_tracing(service_name: &str, verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!(service = service_name, "tracing initialized");
    Ok(())
}
