//! Integration tests for `ReqwestTransport` against a local mock server.

use std::time::Duration;

use httpmock::prelude::*;
use serde_json::{json, Value};
use transport::{CallDescriptor, HttpMethod, HttpTransport, ReqwestTransport, TransportConfig, TransportError};
use url::Url;

fn transport() -> ReqwestTransport {
    ReqwestTransport::new(&TransportConfig {
        timeout: Some(Duration::from_secs(5)),
        user_agent: None,
    })
    .expect("client should build")
}

fn descriptor(
    server: &MockServer,
    method: HttpMethod,
    path: &str,
    query: &[(&str, &str)],
    body: Option<Value>,
) -> CallDescriptor {
    CallDescriptor {
        method,
        url: Url::parse(&server.url(path)).unwrap(),
        headers: vec![
            ("Authorization".into(), "Bearer test-api-key".into()),
            ("Content-Type".into(), "application/json".into()),
        ],
        query: query
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        body,
    }
}

#[tokio::test]
async fn get_sends_bearer_header_and_query() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/dapis")
                .header("authorization", "Bearer test-api-key")
                .query_param("network", "ethereum")
                .query_param("status", "active")
                .query_param_missing("category");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "dapis": [{ "id": "dapi1" }] }));
        })
        .await;

    let call = descriptor(
        &server,
        HttpMethod::Get,
        "/dapis",
        &[("network", "ethereum"), ("status", "active")],
        None,
    );
    let body = transport().send(&call).await.expect("request should succeed");

    assert_eq!(body, json!({ "dapis": [{ "id": "dapi1" }] }));
    mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn post_sends_json_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/oev/auctions/a-1/bids")
                .header("content-type", "application/json")
                .json_body(json!({ "bidAmount": "1.5", "signature": "0xsig" }));
            then.status(201).json_body(json!({ "bidId": "b-9" }));
        })
        .await;

    let call = descriptor(
        &server,
        HttpMethod::Post,
        "/oev/auctions/a-1/bids",
        &[],
        Some(json!({ "bidAmount": "1.5", "signature": "0xsig" })),
    );
    let body = transport().send(&call).await.expect("request should succeed");

    assert_eq!(body["bidId"], "b-9");
    mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn empty_success_body_is_null() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/airnodes/node-1");
            then.status(204);
        })
        .await;

    let call = descriptor(&server, HttpMethod::Delete, "/airnodes/node-1", &[], None);
    let body = transport().send(&call).await.expect("request should succeed");

    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn error_status_carries_server_message_and_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/dapis/missing");
            then.status(404)
                .json_body(json!({ "message": "dAPI not found", "code": "NOT_FOUND" }));
        })
        .await;

    let call = descriptor(&server, HttpMethod::Get, "/dapis/missing", &[], None);
    let err = transport().send(&call).await.expect_err("404 must fail");

    match err {
        TransportError::Status { status, message, body } => {
            assert_eq!(status, 404);
            assert_eq!(message, "dAPI not found");
            assert_eq!(body["code"], "NOT_FOUND");
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    // Port 9 (discard) on localhost is closed in test environments.
    let call = CallDescriptor {
        method: HttpMethod::Get,
        url: Url::parse("http://127.0.0.1:9/dapis").unwrap(),
        headers: Vec::new(),
        query: Vec::new(),
        body: None,
    };

    let err = transport().send(&call).await.expect_err("nothing listens there");
    assert!(matches!(err, TransportError::Network(_)));
    assert_eq!(err.status(), None);
}
