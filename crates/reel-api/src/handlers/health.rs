//! Health check endpoints

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct HealthCheckResponse {
    pub status: &'static str,
    pub storage_backend: String,
    pub processor: &'static str,
}

/// Liveness check. Only reports that the process is serving requests.
pub async fn liveness_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "alive" })))
}

/// Reports the wired storage backend and processor.
///
/// No object-store round trip is made: buckets are chosen per request, so
/// there is no single bucket to check.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthCheckResponse {
        status: "healthy",
        storage_backend: state.storage.backend_type().to_string(),
        processor: state.processor.name(),
    })
}
