//! Error types for the request handler.

use crtisbn_core::CoreError;
use serde::Serialize;
use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur while handling a request.
#[derive(Error, Debug)]
pub enum ServerError {
    /// The request itself is malformed or out of bounds.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The prefix has no unissued identifier left within the search
    /// scheme.
    #[error("no unique identifier available for prefix {prefix}")]
    Exhausted {
        /// The prefix whose capacity ran out.
        prefix: String,
    },

    /// The ledger failed to read or persist.
    #[error("storage failure: {0}")]
    Storage(String),

    /// Internal engine failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// True if the caller is at fault (4xx-class).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServerError::InvalidRequest(_) | ServerError::Exhausted { .. }
        )
    }

    /// The HTTP-style status code a transport should signal.
    pub fn status(&self) -> u16 {
        if self.is_client_error() {
            400
        } else {
            500
        }
    }
}

impl From<CoreError> for ServerError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MalformedInput { .. } | CoreError::InvalidParameter { .. } => {
                ServerError::InvalidRequest(err.to_string())
            }
            CoreError::Store(inner) => ServerError::Storage(inner.to_string()),
            CoreError::NoInverse { .. } => ServerError::Internal(err.to_string()),
        }
    }
}

/// Wire form of a failed request.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// HTTP-style status code.
    pub status: u16,
    /// Human-readable description.
    pub error: String,
}

impl From<&ServerError> for ErrorResponse {
    fn from(err: &ServerError) -> Self {
        Self {
            status: err.status(),
            error: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_classification() {
        assert!(ServerError::InvalidRequest("bad".into()).is_client_error());
        assert!(ServerError::Exhausted {
            prefix: "978316".into()
        }
        .is_client_error());
        assert!(!ServerError::Storage("disk".into()).is_client_error());
    }

    #[test]
    fn status_codes() {
        assert_eq!(ServerError::InvalidRequest("bad".into()).status(), 400);
        assert_eq!(ServerError::Storage("disk".into()).status(), 500);
    }

    #[test]
    fn core_errors_map_to_client_or_server() {
        let err: ServerError = CoreError::malformed("too short").into();
        assert!(err.is_client_error());

        let err: ServerError = CoreError::invalid_parameter("publisher").into();
        assert!(err.is_client_error());
    }
}
