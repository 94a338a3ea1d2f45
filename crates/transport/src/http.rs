//! reqwest-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{CallDescriptor, HttpMethod, HttpTransport, TransportError};

const DEFAULT_USER_AGENT: &str = concat!("api3-oracle/", env!("CARGO_PKG_VERSION"));

/// Knobs for the underlying HTTP client.
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    /// Whole-request timeout. `None` leaves reqwest's default (no timeout).
    pub timeout: Option<Duration>,
    /// Overrides the default `User-Agent`.
    pub user_agent: Option<String>,
}

/// Production transport. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport with its own client.
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder().user_agent(
            config
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        );
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, call: &CallDescriptor) -> Result<Value, TransportError> {
        debug!(method = %call.method, url = %call.full_url(), "sending request");

        let mut request = self.client.request(to_method(call.method), call.url.clone());
        for (name, value) in &call.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if !call.query.is_empty() {
            request = request.query(&call.query);
        }
        if let Some(body) = &call.body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        let body = parse_body(&text);

        if status.is_success() {
            debug!(status = status.as_u16(), "request succeeded");
            return Ok(body);
        }

        let message = error_message(&body, status);
        warn!(status = status.as_u16(), %message, "request rejected by server");
        Err(TransportError::Status {
            status: status.as_u16(),
            message,
            body,
        })
    }
}

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Empty → `null`, JSON → parsed, anything else → string.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn error_message(body: &Value, status: StatusCode) -> String {
    let from_body = ["message", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .or_else(|| match body {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        });

    from_body.unwrap_or_else(|| {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_body_decodes_to_null() {
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body("  \n"), Value::Null);
    }

    #[test]
    fn non_json_body_is_kept_as_text() {
        assert_eq!(parse_body("deleted"), json!("deleted"));
        assert_eq!(parse_body(r#"{"ok":true}"#), json!({ "ok": true }));
    }

    #[test]
    fn error_message_prefers_message_then_error_field() {
        let status = StatusCode::BAD_REQUEST;
        assert_eq!(
            error_message(&json!({ "message": "bad dapi", "error": "x" }), status),
            "bad dapi"
        );
        assert_eq!(error_message(&json!({ "error": "nope" }), status), "nope");
        assert_eq!(error_message(&json!("plain failure"), status), "plain failure");
        assert_eq!(error_message(&Value::Null, status), "Bad Request");
    }
}
