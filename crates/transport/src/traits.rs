//! The `HttpTransport` trait: the contract every transport must fulfil.

use async_trait::async_trait;
use serde_json::Value;

use crate::{CallDescriptor, TransportError};

/// Sends one described request and returns the decoded response body.
///
/// Implementations must not retry: a failure is reported to the caller
/// exactly once.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, call: &CallDescriptor) -> Result<Value, TransportError>;
}
