use crate::services::TransferCoordinator;
use reel_core::Config;
use reel_processing::VideoProcessor;
use reel_storage::Storage;
use std::sync::Arc;

/// Shared application state. Built once at startup and never mutated.
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub processor: Arc<dyn VideoProcessor>,
    pub coordinator: TransferCoordinator,
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Arc<dyn Storage>,
        processor: Arc<dyn VideoProcessor>,
    ) -> Self {
        let coordinator = TransferCoordinator::new(
            storage.clone(),
            processor.clone(),
            config.scratch_dir().cloned(),
        );
        Self {
            config,
            storage,
            processor,
            coordinator,
        }
    }
}
