//! Errors raised while loading configuration.
//!
//! Emission itself never fails; only building a configuration from files or
//! strings can.

use std::path::PathBuf;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading a [`LoggerConfig`](crate::LoggerConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Io { path: PathBuf, source: std::io::Error },
    /// The config text is not valid TOML or has the wrong shape.
    Parse(String),
    /// A value was well-formed but not acceptable.
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    /// A rejected value for `key`.
    pub fn invalid_value(key: &str, message: impl std::fmt::Display) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Failed to read {}: {source}", path.display())
            }
            ConfigError::Parse(msg) => write!(f, "Invalid config: {msg}"),
            ConfigError::InvalidValue { key, message } => {
                write!(f, "Invalid value for {key}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.message().to_string())
    }
}
