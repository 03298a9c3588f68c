//! Error types for the identifier engine.

use thiserror::Error;

/// Result type for engine operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in engine operations.
///
/// Search exhaustion is not an error: `generate` reports it as `Ok(None)`
/// and the caller decides what that means.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input is not a well-formed identifier.
    #[error("malformed identifier: {reason}")]
    MalformedInput {
        /// Why the input was rejected.
        reason: String,
    },

    /// A parameter is outside its allowed range.
    #[error("invalid parameter: {message}")]
    InvalidParameter {
        /// Description of the violation.
        message: String,
    },

    /// No modular inverse exists.
    ///
    /// Defensive only: the engine's moduli are the primes 3, 5 and 7, so
    /// this cannot occur through the public API.
    #[error("no modular inverse of {value} modulo {modulus}")]
    NoInverse {
        /// The value that has no inverse.
        value: i64,
        /// The modulus.
        modulus: i64,
    },

    /// The store failed to read or persist.
    #[error("store error: {0}")]
    Store(#[from] crtisbn_store::StoreError),
}

impl CoreError {
    /// Creates a malformed-input error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            reason: reason.into(),
        }
    }

    /// Creates an invalid-parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }
}
