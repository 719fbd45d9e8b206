//! Storage setup and initialization

use anyhow::{Context, Result};
use reel_core::Config;
use reel_storage::{create_storage, Storage};
use std::sync::Arc;

/// Build the shared storage client for the configured backend.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage abstraction...");
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;
    tracing::info!(
        backend = %storage.backend_type(),
        max_retries = config.storage_max_retries(),
        timeout_secs = config.storage_timeout_secs(),
        "Storage abstraction initialized successfully"
    );
    Ok(storage)
}
