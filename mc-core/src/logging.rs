//! Structured Logging
//!
//! Pretty output for interactive use, JSON for machine consumption.
//!
//! # Log Levels
//!
//! | Level | Usage |
//! |-------|-------|
//! | WARN  | Persistence failures, malformed or duplicated stored data |
//! | INFO  | Lifecycle state changes (create, approve, update, column upload) |
//! | DEBUG | Lookups that found nothing, load summaries |
//!
//! Lifecycle events carry structured fields (`metric_id`, `version`,
//! `approved_by`, `operation`, `error`) rather than values interpolated into
//! the message.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing_subscriber::{fmt as sfmt, prelude::*, EnvFilter};

use crate::error::{MetricError, MetricResult};

/// Log level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Warn
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

impl LogFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }
}

impl Default for LogFormat {
    fn default() -> Self {
        Self::Compact
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    /// Include source file/line
    pub include_source: bool,
    /// Explicit filter directive (e.g. "mc_core=debug,sled=warn"),
    /// overrides `level`
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            format: LogFormat::Compact,
            include_source: false,
            filter: None,
        }
    }
}

impl LogConfig {
    /// Verbose configuration for troubleshooting
    pub fn development() -> Self {
        Self {
            level: LogLevel::Debug,
            format: LogFormat::Pretty,
            include_source: true,
            filter: None,
        }
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Filter directive this configuration resolves to
    pub fn directive(&self) -> String {
        match &self.filter {
            Some(f) => f.clone(),
            None => format!(
                "mc_core={level},mc_store={level},mc_cli={level},metricctl={level}",
                level = self.level
            ),
        }
    }
}

/// Install the global tracing subscriber
///
/// Logs go to stderr so command output on stdout stays parseable.
pub fn init_logging(config: &LogConfig) -> MetricResult<()> {
    let filter = EnvFilter::try_new(config.directive()).map_err(|e| MetricError::Configuration {
        reason: format!("invalid log filter: {}", e),
    })?;

    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                sfmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_file(config.include_source)
                    .with_line_number(config.include_source),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                sfmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_file(config.include_source)
                    .with_line_number(config.include_source),
            )
            .try_init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                sfmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_file(config.include_source)
                    .with_line_number(config.include_source),
            )
            .try_init(),
    };

    installed.map_err(|e| MetricError::Configuration {
        reason: format!("logging already initialized: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("INFO"), Some(LogLevel::Info));
        assert_eq!(LogLevel::from_str("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_str("loud"), None);
        assert_eq!(LogFormat::from_str("Json"), Some(LogFormat::Json));
    }

    #[test]
    fn test_default_level_is_warn() {
        assert_eq!(LogLevel::default(), LogLevel::Warn);
        assert_eq!(LogConfig::default().level, LogLevel::default());
    }

    #[test]
    fn test_directive_covers_workspace_crates() {
        let config = LogConfig::default().with_level(LogLevel::Debug);
        let directive = config.directive();
        assert!(directive.contains("mc_core=debug"));
        assert!(directive.contains("mc_store=debug"));

        let custom = LogConfig {
            filter: Some("sled=trace".to_string()),
            ..LogConfig::default()
        };
        assert_eq!(custom.directive(), "sled=trace");
    }
}
