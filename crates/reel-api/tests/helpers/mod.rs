#![allow(dead_code)]

pub mod processors;
pub mod storage;

use axum_test::TestServer;
use reel_api::setup::routes::setup_routes;
use reel_api::AppState;
use reel_core::Config;
use reel_processing::VideoProcessor;
use reel_storage::Storage;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub use processors::{Behavior, ScriptedProcessor};
pub use storage::RecordingStorage;

/// Test application with an isolated scratch root
pub struct TestApp {
    pub server: TestServer,
    pub scratch: TempDir,
}

impl TestApp {
    /// Get the HTTP test client
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Entries left behind under the scratch root
    pub fn scratch_entries(&self) -> usize {
        std::fs::read_dir(self.scratch.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

/// Build a config from explicit variables only, ignoring the process environment.
pub fn test_config(pairs: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned()).expect("Failed to build test config")
}

/// Setup a test application around the given storage and processor doubles
pub fn setup_test_app(storage: Arc<dyn Storage>, processor: Arc<dyn VideoProcessor>) -> TestApp {
    let scratch = TempDir::new().expect("Failed to create scratch root");
    let config = config_with_scratch(scratch.path());

    let state = Arc::new(AppState::new(config.clone(), storage, processor));
    let app = setup_routes(&config, state);
    let server = TestServer::new(app).expect("Failed to create test server");

    TestApp { server, scratch }
}

fn config_with_scratch(scratch: &Path) -> Config {
    let scratch = scratch.to_str().expect("scratch path is not UTF-8");
    test_config(&[("SCRATCH_DIR", scratch)])
}
