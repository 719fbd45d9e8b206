//! Route and middleware wiring

use crate::handlers;
use crate::middleware::request_id_middleware;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use reel_core::Config;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::trace::TraceLayer;

/// Build the application router.
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router {
    let http_concurrency_limit = config.http_concurrency_limit();
    tracing::info!(
        limit = http_concurrency_limit,
        max_body_bytes = config.max_request_body_bytes(),
        "HTTP concurrency limit layer enabled"
    );

    Router::new()
        .route("/", post(handlers::transfer::process_video))
        .route("/process", post(handlers::transfer::process_video))
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness_check))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        // Enforced by the body extractor so the handler can answer in JSON
        .layer(DefaultBodyLimit::max(config.max_request_body_bytes()))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state)
}
