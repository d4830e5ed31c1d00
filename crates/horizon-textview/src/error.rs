//! Error types for the text view crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or saving a [`TextViewConfig`](crate::TextViewConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read or written.
    #[error("failed to access config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML was malformed or contained invalid values.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be turned into TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
