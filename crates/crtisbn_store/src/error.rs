//! Error types for ledger storage.

use std::io;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The ledger could not be encoded for persistence.
    #[error("ledger encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// The durable write did not complete.
    #[error("persist failed: {0}")]
    PersistFailed(String),
}
