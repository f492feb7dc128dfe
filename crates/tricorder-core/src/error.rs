//! Error types for the tricorder core.

use thiserror::Error;

/// Result type for tricorder core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or serializing scans.
///
/// The scan itself never fails: degenerate input produces a degenerate
/// but well-formed result.
#[derive(Debug, Error)]
pub enum Error {
    /// A tunable is outside its allowed range
    #[error("invalid config: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    /// An environment variable could not be parsed
    #[error("invalid environment variable {name}={value:?}")]
    InvalidEnv { name: &'static str, value: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
