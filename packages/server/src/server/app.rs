//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    http::{header::CONTENT_TYPE, HeaderName, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::BaseJobStore;
use crate::server::middleware::api_key_middleware;
use crate::server::routes::{
    health_handler, import_jobs_handler, import_runs_handler, import_usage_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BaseJobStore>,
}

/// Build the Axum application router
///
/// The import endpoint is guarded by the API-key middleware; the usage
/// example and health endpoints are open. CORS is wildcard-origin with the
/// import surface's methods and headers, and preflight OPTIONS requests are
/// answered by the CORS layer itself.
pub fn build_app(store: Arc<dyn BaseJobStore>, import_api_key: String) -> Router {
    let state = AppState { store };

    // CORS configuration for the import surface
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static("x-api-key")]);

    // Import surface behind API-key auth
    let guarded = Router::new()
        .route("/api/jobs/import", post(import_jobs_handler))
        .route("/api/jobs/import/runs", get(import_runs_handler))
        .route_layer(middleware::from_fn(move |req, next| {
            api_key_middleware(import_api_key.clone(), req, next)
        }));

    Router::new()
        .merge(guarded)
        .route("/api/jobs/import/test", get(import_usage_handler))
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
