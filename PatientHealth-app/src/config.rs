//! Runtime configuration for the PatientHealth runner
//!
//! Settings come from environment variables, optionally loaded from a `.env`
//! file first:
//! - `RUST_LOG`: tracing filter, defaults to `info`
//! - `ALERT_SINK`: `log` (default) or `console`
//! - `PATIENT_HEALTH_SCENARIO`: path to a JSON scenario file

use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_LOG_FILTER: &str = "info";

/// Configuration error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Unknown alert sink name
    #[error("Unsupported alert sink: {0} (expected 'log' or 'console')")]
    UnsupportedAlertSink(String),
}

/// Where alerts are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertSink {
    /// Alerts become `warn` level tracing events
    #[default]
    Log,
    /// Alerts are printed to stdout
    Console,
}

impl FromStr for AlertSink {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "log" | "tracing" => Ok(AlertSink::Log),
            "console" | "stdout" => Ok(AlertSink::Console),
            _ => Err(ConfigError::UnsupportedAlertSink(s.to_string())),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Tracing filter directive
    pub log_filter: String,
    /// Alert delivery target
    pub alert_sink: AlertSink,
    /// Scenario file, or `None` for the built-in demo
    pub scenario_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            alert_sink: AlertSink::default(),
            scenario_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_filter = lookup("RUST_LOG")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let alert_sink = match lookup("ALERT_SINK") {
            Some(value) if !value.trim().is_empty() => value.parse()?,
            _ => AlertSink::default(),
        };

        let scenario_path = lookup("PATIENT_HEALTH_SCENARIO")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            log_filter,
            alert_sink,
            scenario_path,
        })
    }
}
