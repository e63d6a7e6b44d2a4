//! Batch job import endpoint.
//!
//! Request-level validation (auth, shape, quota) happens here and rejects
//! the whole request; per-record failures are the importer's business and
//! come back as a partial success inside a 200 response.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::domains::jobs::ingest::import_batch;
use crate::server::app::AppState;

/// Hard cap on records per import request
pub const MAX_JOBS_PER_REQUEST: usize = 1000;

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub source: String,
    pub jobs: Vec<Value>,
}

/// Request-level API errors for the import surface
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Import failed")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message })),
            )
                .into_response(),
            ApiError::Internal(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Import failed", "details": e.to_string() })),
            )
                .into_response(),
        }
    }
}

/// POST /api/jobs/import
///
/// Body: `{ source, jobs }`. Responds 200 with per-record results even when
/// some records failed (`failed > 0` is a partial success, not an error).
pub async fn import_jobs_handler(
    State(state): State<AppState>,
    payload: Result<Json<ImportRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload
        .map_err(|rejection| ApiError::BadRequest(format!("Invalid request body: {}", rejection)))?;

    if request.source.trim().is_empty() {
        return Err(ApiError::BadRequest("source must not be empty".to_string()));
    }
    if request.jobs.len() > MAX_JOBS_PER_REQUEST {
        return Err(ApiError::BadRequest(format!(
            "Maximum {} jobs per import request",
            MAX_JOBS_PER_REQUEST
        )));
    }

    let outcome = import_batch(state.store.as_ref(), &request.source, &request.jobs).await;

    Ok(Json(json!({
        "success": true,
        "results": outcome.results,
        "log_id": outcome.run_id,
    })))
}

#[derive(Debug, Deserialize)]
pub struct RunsQuery {
    pub source: String,
    #[serde(default = "default_runs_limit")]
    pub limit: i64,
}

fn default_runs_limit() -> i64 {
    20
}

/// GET /api/jobs/import/runs
///
/// Recent run-log entries for a source, newest first. Operational surface,
/// behind the same API key as the import itself.
pub async fn import_runs_handler(
    State(state): State<AppState>,
    Query(query): Query<RunsQuery>,
) -> Result<Json<Value>, ApiError> {
    let runs = state
        .store
        .recent_import_runs(&query.source, query.limit.clamp(1, 100))
        .await?;
    Ok(Json(json!({ "source": query.source, "runs": runs })))
}

/// GET /api/jobs/import/test
///
/// Static usage example for integrators; no auth, no business logic.
pub async fn import_usage_handler() -> Json<Value> {
    Json(json!({
        "endpoint": "/api/jobs/import",
        "method": "POST",
        "headers": {
            "x-api-key": "<configured import API key>",
            "Content-Type": "application/json"
        },
        "body": {
            "source": "example-board",
            "jobs": [{
                "id": "12345",
                "title": "Software Engineer",
                "company": "Tech Hub Freetown",
                "description": "What the role involves...",
                "location": "Freetown",
                "type": "full-time",
                "salary": "SLL 5,000,000 - 8,000,000",
                "deadline": "2025-12-31",
                "url": "https://example-board.sl/jobs/12345"
            }]
        },
        "limits": {
            "max_jobs_per_request": MAX_JOBS_PER_REQUEST
        }
    }))
}
