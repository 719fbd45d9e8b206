//! Placeholder processor: copies the input unchanged.

use crate::traits::{ProcessOutcome, VideoProcessor};
use async_trait::async_trait;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughProcessor;

impl PassthroughProcessor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl VideoProcessor for PassthroughProcessor {
    async fn process(&self, input: &Path, output: &Path) -> Result<ProcessOutcome, anyhow::Error> {
        let start = std::time::Instant::now();

        match tokio::fs::copy(input, output).await {
            Ok(size) => {
                tracing::info!(
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Video processing completed (passthrough)"
                );
                Ok(ProcessOutcome::Succeeded)
            }
            Err(e) => {
                tracing::error!(error = %e, "Processing error");
                if let Err(remove_err) = tokio::fs::remove_file(output).await {
                    if remove_err.kind() != std::io::ErrorKind::NotFound {
                        tracing::warn!(
                            error = %remove_err,
                            path = %output.display(),
                            "Failed to remove partial output"
                        );
                    }
                }
                Ok(ProcessOutcome::failed(e.to_string()))
            }
        }
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }
}
