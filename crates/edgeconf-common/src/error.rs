//! Unified error types for the edgeconf workspace.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum EdgeconfError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A required configuration key has no value.
    #[error("missing required configuration value: {key}")]
    MissingConfig {
        /// Name of the missing key.
        key: String,
    },

    /// A configuration value could not be parsed as a URI.
    #[error("invalid URI in {key} ({value}): {source}")]
    InvalidUri {
        /// Configuration key the value was read from.
        key: String,
        /// Raw value that failed to parse.
        value: String,
        /// Underlying parse error.
        source: url::ParseError,
    },

    /// A module descriptor violates a precondition.
    #[error("invalid module '{name}': {message}")]
    InvalidModule {
        /// Name of the offending module.
        name: String,
        /// Description of the violation.
        message: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl EdgeconfError {
    /// Shorthand for a [`EdgeconfError::Config`] error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, EdgeconfError>;
