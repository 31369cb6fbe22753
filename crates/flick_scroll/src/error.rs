//! Scroll configuration errors

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a [`ScrollConfig`](crate::ScrollConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read a configuration file
    #[error("Failed to read scroll config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML document could not be parsed into a config
    #[error("Failed to parse scroll config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be written as TOML
    #[error("Failed to serialize scroll config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value would produce NaN or infinite motion
    #[error("Invalid scroll config value for `{key}`: {value} ({reason})")]
    Invalid {
        key: &'static str,
        value: f32,
        reason: &'static str,
    },
}

/// Result type for scroll configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
