//! Error types for confbind-sources

use thiserror::Error;

/// Result type alias for building sources
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a configuration source
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file could not be found
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path that was searched
        path: String,
    },

    /// Failed to parse a YAML document
    #[error("failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
