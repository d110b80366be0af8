//! Client error types
//!
//! Errors raised by the persistence port and the backend clients.

use thiserror::Error;

/// Errors from a key-value persistence backend
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Slot contents could not be serialized or parsed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The backing storage is not reachable (e.g. browser storage disabled)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Errors from the question-answering and dashboard endpoints
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection refused or host unreachable
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// The request did not settle within the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Backend answered with a non-2xx status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Request could not be built or sent
    #[error("Request failed: {0}")]
    Request(String),
}

impl ClientError {
    /// Whether the backend answered at all
    pub fn is_http_status(&self) -> bool {
        matches!(self, ClientError::Status { .. })
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Unavailable(err.to_string())
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Request(err.to_string())
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for backend calls
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::Status {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error 500: boom");
        assert!(err.is_http_status());

        assert_eq!(ClientError::Timeout.to_string(), "Request timeout");
        assert!(!ClientError::Timeout.is_http_status());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let store_err: StoreError = io_err.into();
        assert!(matches!(store_err, StoreError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let client_err: ClientError = json_err.into();
        assert!(matches!(client_err, ClientError::Decode(_)));
    }
}
