//! Engine-level error types.

use thiserror::Error;
use transport::TransportError;

/// Errors produced while resolving, validating or executing one operation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    // ------ Selection errors ------

    /// The resource selector names no known resource.
    #[error("The resource \"{0}\" is not supported")]
    UnsupportedResource(String),

    /// The resource exists but has no such operation.
    #[error("Unknown operation: {operation} (resource \"{resource}\")")]
    UnknownOperation { resource: String, operation: String },

    // ------ Validation errors (raised before any network call) ------

    /// A JSON-typed parameter did not parse.
    #[error("Invalid JSON in {parameter}: {message}")]
    InvalidJson { parameter: String, message: String },

    /// A required parameter was missing or empty.
    #[error("Missing required parameter: {parameter}")]
    MissingParameter { parameter: String },

    /// A parameter had the wrong shape (e.g. text where a number is expected).
    #[error("Invalid value for {parameter}: {message}")]
    InvalidParameter { parameter: String, message: String },

    /// The credential record's base URL is unusable.
    #[error("invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    // ------ Transport / API errors ------

    /// The request failed on the wire or the API rejected it.
    #[error("API3 Oracle API error: {message}")]
    Api { status: Option<u16>, message: String },
}

impl EngineError {
    /// True for errors detected locally, before contacting the network.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidJson { .. }
                | EngineError::MissingParameter { .. }
                | EngineError::InvalidParameter { .. }
                | EngineError::InvalidBaseUrl { .. }
        )
    }

    /// The parameter a validation error refers to.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            EngineError::InvalidJson { parameter, .. }
            | EngineError::MissingParameter { parameter }
            | EngineError::InvalidParameter { parameter, .. } => Some(parameter),
            _ => None,
        }
    }
}

impl From<TransportError> for EngineError {
    fn from(err: TransportError) -> Self {
        EngineError::Api {
            status: err.status(),
            message: err.message(),
        }
    }
}

/// A failure that stopped a node invocation.
#[derive(Debug, Error)]
#[error("{node}: {source}")]
pub struct NodeError {
    /// Name of the node the failure is attributed to.
    pub node: String,
    /// Input item being processed, when the failure is item-specific.
    pub item: Option<usize>,
    #[source]
    pub source: EngineError,
}

impl NodeError {
    pub fn new(node: impl Into<String>, item: Option<usize>, source: EngineError) -> Self {
        Self {
            node: node.into(),
            item,
            source,
        }
    }
}
