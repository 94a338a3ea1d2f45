//! `Api3Client`: a typed client over the dispatch table.
//!
//! Every `(resource, operation)` pair has one method (grouped by resource in
//! the sibling modules). They all funnel through [`Api3Client::call`], which
//! the dispatcher also uses, so there is exactly one request-building path.

mod airnodes;
mod dao;
mod dapis;
mod oev;
mod staking;

pub use dao::VoteSupport;
pub use dapis::HistoryInterval;
pub use staking::PositionAction;

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;
use transport::{CallDescriptor, HttpTransport};

use crate::operations::{self, OperationSpec};
use crate::request::build_call;
use crate::{Credentials, EngineError, Parameters, Resource};

#[derive(Clone)]
pub struct Api3Client {
    transport: Arc<dyn HttpTransport>,
    credentials: Credentials,
}

impl Api3Client {
    pub fn new(transport: Arc<dyn HttpTransport>, credentials: Credentials) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Build the request for an operation without sending it.
    pub fn describe(
        &self,
        resource: Resource,
        operation: &str,
        params: &Parameters,
    ) -> Result<CallDescriptor, EngineError> {
        build_call(operations::find(resource, operation)?, params, &self.credentials)
    }

    /// Run any operation by name.
    ///
    /// # Errors
    /// Validation errors before sending; [`EngineError::Api`] for anything
    /// the transport reports.
    pub async fn call(
        &self,
        resource: Resource,
        operation: &str,
        params: &Parameters,
    ) -> Result<Value, EngineError> {
        let spec = operations::find(resource, operation)?;
        self.call_spec(spec, params).await
    }

    pub(crate) async fn call_spec(
        &self,
        spec: &OperationSpec,
        params: &Parameters,
    ) -> Result<Value, EngineError> {
        let call = build_call(spec, params, &self.credentials)?;
        debug!(
            resource = %spec.resource,
            operation = spec.name,
            method = %call.method,
            url = %call.full_url(),
            "dispatching"
        );
        Ok(self.transport.send(&call).await?)
    }
}

impl std::fmt::Debug for Api3Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Api3Client")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
