//! Processor setup and application state assembly

use crate::state::AppState;
use anyhow::{Context, Result};
use reel_core::Config;
use reel_processing::create_processor;
use reel_storage::Storage;
use std::sync::Arc;

/// Build the processor and assemble the shared application state.
pub fn initialize_services(config: &Config, storage: Arc<dyn Storage>) -> Result<Arc<AppState>> {
    let processor = create_processor(config).context("Failed to initialize video processor")?;
    tracing::info!(
        processor = processor.name(),
        scratch_dir = ?config.scratch_dir(),
        "Video processor initialized"
    );

    Ok(Arc::new(AppState::new(config.clone(), storage, processor)))
}
