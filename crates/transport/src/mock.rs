//! `MockTransport`: a test double for `HttpTransport`.
//!
//! Records every descriptor it receives and answers from a script, so tests
//! can assert both what would have gone on the wire and how callers react to
//! each kind of reply.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::{CallDescriptor, HttpTransport, TransportError};

/// One reply the mock will produce.
#[derive(Debug, Clone)]
pub enum MockBehaviour {
    /// Succeed with a specific JSON body.
    ReturnValue(Value),
    /// Fail with the given error.
    Fail(TransportError),
    /// Succeed with a summary of the request (method, url, query, body).
    Echo,
}

/// A transport that never touches the network.
pub struct MockTransport {
    script: Mutex<VecDeque<MockBehaviour>>,
    /// Used once the script is exhausted.
    fallback: MockBehaviour,
    /// All descriptors seen by this transport (in call order).
    pub calls: Arc<Mutex<Vec<CallDescriptor>>>,
}

impl MockTransport {
    fn with(script: Vec<MockBehaviour>, fallback: MockBehaviour) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always succeed with `value`.
    pub fn returning(value: Value) -> Self {
        Self::with(Vec::new(), MockBehaviour::ReturnValue(value))
    }

    /// Always echo the request back.
    pub fn echoing() -> Self {
        Self::with(Vec::new(), MockBehaviour::Echo)
    }

    /// Always fail with `error`.
    pub fn failing(error: TransportError) -> Self {
        Self::with(Vec::new(), MockBehaviour::Fail(error))
    }

    /// Always fail with an HTTP status and a JSON `{ "message": .. }` body.
    pub fn failing_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::failing(TransportError::Status {
            status,
            body: json!({ "message": message }),
            message,
        })
    }

    /// Reply with `script` in order; afterwards every call fails with a
    /// network error so over-calling shows up in assertions.
    pub fn scripted(script: Vec<MockBehaviour>) -> Self {
        Self::with(
            script,
            MockBehaviour::Fail(TransportError::Network("mock script exhausted".into())),
        )
    }

    /// Number of requests this transport has received.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Snapshot of every recorded descriptor.
    pub fn recorded(&self) -> Vec<CallDescriptor> {
        lock(&self.calls).clone()
    }

    /// The most recent descriptor, if any.
    pub fn last_call(&self) -> Option<CallDescriptor> {
        lock(&self.calls).last().cloned()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, call: &CallDescriptor) -> Result<Value, TransportError> {
        lock(&self.calls).push(call.clone());

        let behaviour = lock(&self.script)
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match behaviour {
            MockBehaviour::ReturnValue(v) => Ok(v),
            MockBehaviour::Fail(e) => Err(e),
            MockBehaviour::Echo => Ok(json!({
                "method": call.method.as_str(),
                "url": call.url.as_str(),
                "query": call
                    .query
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect::<serde_json::Map<String, Value>>(),
                "body": call.body.clone(),
            })),
        }
    }
}

// A panic inside a test must not hide the calls recorded before it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
