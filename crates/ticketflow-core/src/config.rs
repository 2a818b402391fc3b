use crate::retry::RetryPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Retry policy parameters (`[retry]` in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts per operation (including the first).
    pub max_attempts: u32,
    /// Delay before the first retry, in milliseconds.
    pub base_delay_ms: u64,
    /// Maximum backoff delay in milliseconds.
    pub max_delay_ms: u64,
    /// Multiplier applied per retry.
    pub backoff_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
            max_delay_ms: 30_000,
            backoff_factor: 2.0,
        }
    }
}

impl RetryConfig {
    /// Policy with out-of-range values pulled back to sane ones.
    pub fn to_policy(&self) -> RetryPolicy {
        let factor = if self.backoff_factor.is_finite() {
            self.backoff_factor.max(1.0)
        } else {
            2.0
        };
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.base_delay_ms))
            .with_max_delay(Duration::from_millis(self.max_delay_ms))
            .with_backoff_factor(factor)
    }
}

/// Error handler switches (`[handler]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// Log every handled failure.
    pub log_errors: bool,
    /// Retry operations run through the handler; when false they run once.
    pub enable_retry: bool,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            log_errors: true,
            enable_retry: true,
        }
    }
}

/// Simulated workflow tuning (`[workflow]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Simulated step latency range `[min, max]` in milliseconds.
    pub step_latency_ms: [u64; 2],
    /// Failure probability per step, in step order. Missing entries use 0.1.
    pub failure_rates: Vec<f64>,
    /// Per-attempt timeout for a step, in milliseconds.
    pub step_timeout_ms: u64,
    /// How many user-initiated retries of a failing step are offered.
    pub user_retry_limit: u32,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            step_latency_ms: [2000, 5000],
            failure_rates: vec![0.2, 0.15, 0.1, 0.1, 0.25, 0.15],
            step_timeout_ms: 30_000,
            user_retry_limit: 3,
        }
    }
}

/// Log output (`[logging]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directives; `RUST_LOG` overrides them.
    pub filter: String,
    /// Write to the state-dir log file; stderr otherwise.
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: crate::logging::DEFAULT_FILTER.to_string(),
            file: true,
        }
    }
}

/// Global configuration loaded from `~/.config/ticketflow/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketflowConfig {
    pub retry: RetryConfig,
    pub handler: HandlerConfig,
    pub workflow: WorkflowConfig,
    pub logging: LoggingConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ticketflow")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TicketflowConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = TicketflowConfig::default();
        write_to(&path, &default_cfg)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

pub fn load_from(path: &Path) -> Result<TicketflowConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: TicketflowConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}

pub fn to_toml(cfg: &TicketflowConfig) -> Result<String> {
    Ok(toml::to_string_pretty(cfg)?)
}

pub fn write_to(path: &Path, cfg: &TicketflowConfig) -> Result<()> {
    let toml = to_toml(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml).with_context(|| format!("write config: {}", path.display()))?;
    Ok(())
}
