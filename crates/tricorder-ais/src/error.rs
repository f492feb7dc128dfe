//! Error types for the AIS layer.

use thiserror::Error;

/// Result type for AIS operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur around the wrapped scan.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration or serialization failure in the core
    #[error(transparent)]
    Core(#[from] tricorder_core::Error),

    /// A batch had no seeds to scan
    #[error("no seeds to scan")]
    EmptyBatch,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
