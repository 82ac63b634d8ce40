// ============================================================
// Layer 6 — Logging Setup
// ============================================================
// Every run appends to <log-dir>/running_logs.log and also
// prints to stdout. Both sinks get INFO and above from this
// crate; RUST_LOG adds further directives.
//
// Line format in the log file (no ANSI colours):
//   2026-10-16T09:12:03.120Z  INFO digit_transfer::application: >>>>> stage ... started <<<<<

use anyhow::{Context, Result};
use std::{
    fs::{self, File, OpenOptions},
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_FILE_NAME: &str = "running_logs.log";

const DEFAULT_DIRECTIVE: &str = "digit_transfer=info";

/// Install the global subscriber. Returns the log file path.
pub fn init(log_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let (path, file) = open_log_file(log_dir)?;

    let stdout_layer = fmt::layer().with_filter(env_filter()?);
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .with_filter(env_filter()?);

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .context("Cannot install the tracing subscriber")?;

    Ok(path)
}

fn env_filter() -> Result<EnvFilter> {
    Ok(EnvFilter::from_default_env().add_directive(DEFAULT_DIRECTIVE.parse()?))
}

/// Create `log_dir` if needed and open the log file for appending.
pub fn open_log_file(log_dir: impl AsRef<Path>) -> Result<(PathBuf, File)> {
    let log_dir = log_dir.as_ref();
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Cannot create log directory '{}'", log_dir.display()))?;

    let path = log_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Cannot open log file '{}'", path.display()))?;
    Ok((path, file))
}
