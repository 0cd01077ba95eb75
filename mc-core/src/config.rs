//! Configuration
//!
//! Supports loading from environment variables with the `MC_` prefix.

use std::env;

use crate::error::{MetricError, MetricResult};
use crate::lifecycle::DEFAULT_RECENT_LIMIT;
use crate::logging::{LogConfig, LogFormat, LogLevel};
use crate::store::StoreConfig;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsConfig {
    pub store: StoreConfig,
    pub log: LogConfig,
    /// Size of the recent-activity list
    pub recent_limit: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            log: LogConfig::default(),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl MetricsConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - MC_DATA_DIR: Store data directory
    /// - MC_CACHE_CAPACITY: Store page cache size in bytes
    /// - MC_FLUSH_ON_WRITE: Flush after every write (true/false)
    /// - MC_LOG_LEVEL: trace/debug/info/warn/error
    /// - MC_LOG_FORMAT: pretty/json/compact
    /// - MC_LOG_FILTER: Full filter directive, overrides MC_LOG_LEVEL
    /// - MC_RECENT_LIMIT: Size of the recent-activity list
    ///
    /// Unset or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let store = StoreConfig {
            data_dir: env::var("MC_DATA_DIR").unwrap_or(defaults.store.data_dir),
            cache_capacity: env::var("MC_CACHE_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.store.cache_capacity),
            flush_on_write: env::var("MC_FLUSH_ON_WRITE")
                .ok()
                .and_then(|s| parse_bool(&s))
                .unwrap_or(defaults.store.flush_on_write),
        };

        let log = LogConfig {
            level: env::var("MC_LOG_LEVEL")
                .ok()
                .and_then(|s| LogLevel::from_str(&s))
                .unwrap_or(defaults.log.level),
            format: env::var("MC_LOG_FORMAT")
                .ok()
                .and_then(|s| LogFormat::from_str(&s))
                .unwrap_or(defaults.log.format),
            include_source: defaults.log.include_source,
            filter: env::var("MC_LOG_FILTER").ok().filter(|s| !s.trim().is_empty()),
        };

        let recent_limit = env::var("MC_RECENT_LIMIT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.recent_limit);

        Self {
            store,
            log,
            recent_limit,
        }
    }

    /// Reject values that cannot work
    pub fn validate(&self) -> MetricResult<()> {
        if self.store.data_dir.trim().is_empty() {
            return Err(MetricError::Configuration {
                reason: "data directory must not be empty".to_string(),
            });
        }
        if self.recent_limit == 0 {
            return Err(MetricError::Configuration {
                reason: "recent limit must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MetricsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.recent_limit, 5);
    }

    #[test]
    fn test_validate_rejects_empty_data_dir() {
        let config = MetricsConfig {
            store: StoreConfig::test(),
            ..MetricsConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.code(), "MC-CONFIG-001");
    }

    #[test]
    fn test_validate_rejects_zero_recent_limit() {
        let config = MetricsConfig {
            recent_limit: 0,
            ..MetricsConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
