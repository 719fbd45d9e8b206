//! Health endpoint integration tests.
//!
//! Run with: `cargo test -p reel-api --test health_test`

mod helpers;

use helpers::{setup_test_app, Behavior, RecordingStorage, ScriptedProcessor};
use reel_storage::StorageBackend;
use serde_json::{json, Value};
use std::sync::Arc;

#[tokio::test]
async fn test_liveness() {
    let app = setup_test_app(
        Arc::new(RecordingStorage::new()),
        Arc::new(ScriptedProcessor::new(Behavior::Copy)),
    );

    let response = app.client().get("/health/live").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body, json!({ "status": "alive" }));
}

#[tokio::test]
async fn test_health_reports_wiring() {
    let storage = Arc::new(RecordingStorage::with_backend(StorageBackend::S3));
    let app = setup_test_app(
        storage.clone(),
        Arc::new(reel_processing::PassthroughProcessor::new()),
    );

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "status": "healthy",
            "storage_backend": "s3",
            "processor": "passthrough"
        })
    );
    // No object-store traffic
    assert_eq!(storage.downloads(), 0);
    assert_eq!(storage.uploads(), 0);
}

#[tokio::test]
async fn test_transfer_endpoint_rejects_get() {
    let app = setup_test_app(
        Arc::new(RecordingStorage::new()),
        Arc::new(ScriptedProcessor::new(Behavior::Copy)),
    );

    let response = app.client().get("/process").await;

    assert_eq!(response.status_code(), 405);
}
