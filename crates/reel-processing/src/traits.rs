//! Core traits for video processing

use async_trait::async_trait;
use std::path::Path;

/// Result of a processing attempt that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The output path holds a complete result, safe to read.
    Succeeded,
    /// No usable output was produced.
    Failed { reason: String },
}

impl ProcessOutcome {
    pub fn failed(reason: impl Into<String>) -> Self {
        ProcessOutcome::Failed {
            reason: reason.into(),
        }
    }
}

/// Video processor trait - transforms one local file into another.
///
/// Expected "cannot process" conditions are reported as
/// [`ProcessOutcome::Failed`]; an `Err` is reserved for unexpected faults.
/// On any outcome other than `Succeeded` the implementation must not leave a
/// partially written file at `output`.
#[async_trait]
pub trait VideoProcessor: Send + Sync {
    async fn process(&self, input: &Path, output: &Path) -> Result<ProcessOutcome, anyhow::Error>;

    /// Short name used in logs and health output
    fn name(&self) -> &'static str;
}
