//! Configuration error types

use crate::error::StoreError;

/// Error types for loading configuration and building stores from it
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO-related errors (file access, permissions, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Seeding the store was rejected by the store itself
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A logger was already installed or the filter could not be applied
    #[error("Logging error: {0}")]
    Logging(String),
}

impl ConfigError {
    pub fn logging<S: Into<String>>(msg: S) -> Self {
        Self::Logging(msg.into())
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::Io(e) => format!("Failed to access configuration file: {}", e),
            ConfigError::Toml(e) => format!("Configuration file format error: {}", e),
            ConfigError::TomlSer(e) => format!("Failed to save configuration: {}", e),
            ConfigError::Store(e) => format!("Configuration seed rejected: {}", e),
            ConfigError::Logging(msg) => format!("Could not initialise logging: {}", msg),
        }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
