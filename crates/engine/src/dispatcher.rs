//! Resource dispatcher: the node's execution loop.
//!
//! `ResourceDispatcher::run`:
//! 1. Resolves the `(resource, operation)` selector against the table.
//! 2. Walks the input items in order, building and sending one request each.
//! 3. Wraps each response as a [`ResultItem`] paired with its input index.
//! 4. On failure either records `{ "error": .. }` for the item and moves on
//!    (continue-on-fail) or stops immediately and returns a [`NodeError`].

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};
use transport::HttpTransport;

use crate::client::Api3Client;
use crate::operations;
use crate::{Credentials, NodeContext, NodeError, Parameters, ResultItem};

// ---------------------------------------------------------------------------
// ResourceDispatcher
// ---------------------------------------------------------------------------

/// Stateless across invocations: nothing from one item or run leaks into
/// the next.
#[derive(Debug, Clone)]
pub struct ResourceDispatcher {
    client: Api3Client,
}

impl ResourceDispatcher {
    pub fn new(transport: Arc<dyn HttpTransport>, credentials: Credentials) -> Self {
        Self::from_client(Api3Client::new(transport, credentials))
    }

    pub fn from_client(client: Api3Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Api3Client {
        &self.client
    }

    /// Run one operation over every item.
    ///
    /// Returns exactly one [`ResultItem`] per input item, in input order,
    /// unless a failure aborts the run.
    ///
    /// # Errors
    /// - Unknown resource or operation, before any item is processed
    ///   (regardless of continue-on-fail).
    /// - With continue-on-fail disabled, the first item failure; later items
    ///   are never sent.
    #[instrument(
        skip(self, ctx, items),
        fields(node = %ctx.node_name, items = items.len())
    )]
    pub async fn run(
        &self,
        ctx: &NodeContext,
        resource: &str,
        operation: &str,
        items: &[Parameters],
    ) -> Result<Vec<ResultItem>, NodeError> {
        let spec = operations::resolve(resource, operation)
            .map_err(|source| NodeError::new(&ctx.node_name, None, source))?;

        info!(
            "dispatching {}/{} ({} {}) over {} item(s)",
            resource,
            operation,
            spec.method,
            spec.path,
            items.len()
        );

        let mut results: Vec<ResultItem> = Vec::with_capacity(items.len());
        let mut failed = 0usize;

        for (index, params) in items.iter().enumerate() {
            match self.client.call_spec(spec, params).await {
                Ok(payload) => {
                    debug!("item {} succeeded", index);
                    results.push(ResultItem::success(index, payload));
                }

                Err(err) if ctx.continue_on_fail => {
                    warn!("item {} failed, continuing: {}", index, err);
                    failed += 1;
                    results.push(ResultItem::failure(index, &err));
                }

                Err(err) => {
                    error!("item {} failed, aborting run: {}", index, err);
                    return Err(NodeError::new(&ctx.node_name, Some(index), err));
                }
            }
        }

        info!(
            "{}/{} finished: {} item(s), {} failed",
            resource,
            operation,
            results.len(),
            failed
        );

        Ok(results)
    }
}
