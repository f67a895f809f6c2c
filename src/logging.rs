//! Logging setup for applications embedding the store.
//!
//! The store itself only emits records through the `log` facade. This module
//! installs an `env_logger` backend for hosts that have no logger of their own.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, ConfigResult};

fn default_level() -> String {
    "info".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSettings {
    /// Filter in `RUST_LOG` syntax, e.g. `info` or `scoped_store=debug`
    #[serde(default = "default_level")]
    pub level: String,
    /// Let `RUST_LOG` override `level` when it is set
    #[serde(default = "default_env_override")]
    pub env_override: bool,
}

fn default_env_override() -> bool {
    true
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            env_override: default_env_override(),
        }
    }
}

impl LogSettings {
    /// The filter that will be handed to `env_logger`
    pub fn effective_filter(&self) -> String {
        if self.env_override {
            if let Ok(filter) = std::env::var("RUST_LOG") {
                if !filter.is_empty() {
                    return filter;
                }
            }
        }
        self.level.clone()
    }
}

/// Installs `env_logger` as the global logger.
///
/// Fails with [`ConfigError::Logging`] when a logger is already installed.
pub fn init_logging(settings: &LogSettings) -> ConfigResult<()> {
    env_logger::Builder::new()
        .parse_filters(&settings.effective_filter())
        .try_init()
        .map_err(|e| ConfigError::logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_used_without_env_override() {
        let settings = LogSettings {
            level: "scoped_store=trace".to_string(),
            env_override: false,
        };
        assert_eq!(settings.effective_filter(), "scoped_store=trace");
    }

    #[test]
    fn test_settings_defaults() {
        let settings: LogSettings = toml::from_str("").unwrap();
        assert_eq!(settings, LogSettings::default());
        assert_eq!(settings.level, "info");
        assert!(settings.env_override);
    }

    #[test]
    fn test_second_init_fails() {
        let settings = LogSettings::default();
        let _ = init_logging(&settings);
        assert!(matches!(
            init_logging(&settings),
            Err(ConfigError::Logging(_))
        ));
    }
}
