//! Transport-level error type.

use serde_json::Value;
use thiserror::Error;

/// Errors returned by an [`HttpTransport`](crate::HttpTransport).
///
/// Variants carry owned strings rather than the underlying client error so
/// that test doubles can construct every case.
#[derive(Debug, Error, Clone)]
pub enum TransportError {
    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status {
        status: u16,
        /// Best human-readable message extracted from the response.
        message: String,
        /// Raw response body (JSON when the server sent JSON).
        body: Value,
    },

    /// A success response whose body could not be read.
    #[error("failed to read response body: {0}")]
    Decode(String),

    /// The descriptor could not be turned into a request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// HTTP status code, when the server responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            TransportError::Status { message, .. } => message.clone(),
            TransportError::Network(msg)
            | TransportError::Decode(msg)
            | TransportError::InvalidRequest(msg) => msg.clone(),
        }
    }
}
