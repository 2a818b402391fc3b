//! Logging init. Directives and the log file come from `[logging]` in
//! config.toml; `RUST_LOG` overrides the configured filter when set.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,ticketflow=debug,ticketflow_core=debug";

/// `~/.local/state/ticketflow/ticketflow.log`, creating the directory.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ticketflow")?;
    Ok(xdg_dirs.place_state_file("ticketflow.log")?)
}

/// Configured directives, or [`DEFAULT_FILTER`] if they do not parse.
fn configured_filter(cfg: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_new(&cfg.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn env_filter(cfg: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| configured_filter(cfg))
}

/// Install the global subscriber. Writes to the state-dir log file unless
/// `cfg.file` is off, in which case this is [`init_logging_stderr`].
///
/// Errors leave no subscriber installed so the caller can fall back to stderr.
pub fn init_logging(cfg: &LoggingConfig) -> Result<()> {
    if !cfg.file {
        init_logging_stderr(cfg);
        return Ok(());
    }

    let path = log_file_path()?;
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(cfg))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {e}"))?;

    tracing::info!("ticketflow logging initialized at {}", path.display());
    Ok(())
}

/// Stderr-only logging. A subscriber that is already installed is left in place.
pub fn init_logging_stderr(cfg: &LoggingConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(cfg))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
