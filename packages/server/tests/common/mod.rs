// Common test utilities

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use server_core::kernel::InMemoryJobStore;
use server_core::server::build_app;

pub const TEST_API_KEY: &str = "test-api-key";

/// Build the app over a shared in-memory store; the caller keeps a handle
/// to the store for inspection.
pub fn test_app(store: &InMemoryJobStore) -> Router {
    build_app(Arc::new(store.clone()), TEST_API_KEY.to_string())
}

/// Fire one request at the router and decode the JSON response body.
pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router never errors");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body is readable");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body is JSON")
    };
    (status, body)
}

/// POST a JSON payload to the import endpoint with the given API key.
pub async fn post_import(
    app: &Router,
    api_key: Option<&str>,
    payload: &Value,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/jobs/import")
        .header("content-type", "application/json");
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }
    let request = builder
        .body(Body::from(serde_json::to_vec(payload).unwrap()))
        .unwrap();
    send_request(app, request).await
}
