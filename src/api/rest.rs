//! REST API Handlers
//!
//! Exposes the function over HTTP: the runtime posts a run request as JSON
//! and receives the response document.

use axum::{
    body::Bytes,
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error};

use crate::error::Error;
use crate::function::{RunFunctionRequest, StorageFunction};
use crate::metrics::FunctionMetrics;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiErrorResponse {
    fn from_error(code: &str, err: &Error) -> (StatusCode, Json<Self>) {
        (
            err.status_code(),
            Json(Self {
                error: code.to_string(),
                message: err.to_string(),
                details: None,
            }),
        )
    }
}

// =============================================================================
// REST Router
// =============================================================================

/// REST API router builder
pub struct RestRouter {
    function: Arc<StorageFunction>,
    metrics: Arc<FunctionMetrics>,
}

impl RestRouter {
    /// Create a new REST router
    pub fn new(function: Arc<StorageFunction>, metrics: Arc<FunctionMetrics>) -> Self {
        Self { function, metrics }
    }

    /// Build the Axum router
    pub fn build(self) -> Router {
        let state = AppState {
            function: self.function,
            metrics: self.metrics,
        };

        Router::new()
            .route("/v1/run-function", post(run_function))
            .route("/health", get(health_check))
            .route("/ready", get(readiness_check))
            .with_state(state)
    }
}

/// Shared application state
#[derive(Clone)]
struct AppState {
    function: Arc<StorageFunction>,
    metrics: Arc<FunctionMetrics>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Run the function for one request
async fn run_function(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let request: RunFunctionRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            let err = Error::from(e);
            error!("Rejecting run request: {}", err);
            return ApiErrorResponse::from_error("invalid_request", &err).into_response();
        }
    };

    debug!(tag = %request.meta.tag, "Received run request");
    let started = Instant::now();
    let response = state.function.run_function(&request);
    state.metrics.record(&response, started.elapsed());

    (StatusCode::OK, Json(response)).into_response()
}

/// Health check
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Readiness check
async fn readiness_check() -> impl IntoResponse {
    (StatusCode::OK, "ready")
}
