//! Error types for the Parley application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the Parley application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Chat-loop failures are not
/// represented here: classification ambiguity resolves to `Intent::Unknown`
/// and evaluation failures are swallowed by the Calculate handler, so only
/// the configuration layer and the legacy importer can surface errors.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ParleyError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed line in a legacy fixed-width data file
    #[error("Legacy data error at line {line}: {message}")]
    LegacyData { line: usize, message: String },
}

impl ParleyError {
    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a LegacyData error for the given 1-based line number
    pub fn legacy_data(line: usize, message: impl Into<String>) -> Self {
        Self::LegacyData {
            line,
            message: message.into(),
        }
    }

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<std::io::Error> for ParleyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<toml::de::Error> for ParleyError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// A type alias for `Result<T, ParleyError>`.
pub type Result<T> = std::result::Result<T, ParleyError>;
