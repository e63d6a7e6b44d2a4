use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::debug;

/// API key authentication middleware
///
/// The import surface is machine-to-machine: callers present a shared secret
/// in the x-api-key header. A mismatch rejects the request with 401 before
/// any processing happens.
pub async fn api_key_middleware(
    expected_key: String,
    request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    if api_key_matches(request.headers(), &expected_key) {
        next.run(request).await
    } else {
        debug!("Rejected request with invalid or missing API key");
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid or missing API key" })),
        )
            .into_response()
    }
}

/// Check the x-api-key header against the configured secret
fn api_key_matches(headers: &HeaderMap, expected_key: &str) -> bool {
    headers
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|provided| provided == expected_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_matching_key_accepted() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("secret"));
        assert!(api_key_matches(&headers, "secret"));
    }

    #[test]
    fn test_wrong_key_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("not-the-secret"));
        assert!(!api_key_matches(&headers, "secret"));
    }

    #[test]
    fn test_missing_key_rejected() {
        assert!(!api_key_matches(&HeaderMap::new(), "secret"));
    }
}
