//! Transfer coordinator
//!
//! Runs one request through validate, download, process and upload, and
//! turns every outcome into a status code plus a [`TransferResult`].

use crate::services::ScratchArea;
use futures::FutureExt;
use reel_core::models::PROCESSING_FAILED_MESSAGE;
use reel_core::{AppError, ErrorMetadata, LogLevel, ObjectLocator, TransferRequest, TransferResult};
use reel_processing::{ProcessOutcome, VideoProcessor};
use reel_storage::{processed_output_key, Storage};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::Arc;

/// Status and body produced for a single transfer request.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferResponse {
    pub status: u16,
    pub result: TransferResult,
}

impl TransferResponse {
    fn new(status: u16, result: TransferResult) -> Self {
        Self { status, result }
    }

    /// A request turned away before any transfer work began.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::new(status, TransferResult::rejected(message))
    }
}

/// How a transaction that ran without a fault ended.
enum Completion {
    Uploaded { output: ObjectLocator },
    ProcessingFailed { reason: String },
}

#[derive(Clone)]
pub struct TransferCoordinator {
    storage: Arc<dyn Storage>,
    processor: Arc<dyn VideoProcessor>,
    scratch_root: Option<PathBuf>,
}

impl TransferCoordinator {
    pub fn new(
        storage: Arc<dyn Storage>,
        processor: Arc<dyn VideoProcessor>,
        scratch_root: Option<PathBuf>,
    ) -> Self {
        Self {
            storage,
            processor,
            scratch_root,
        }
    }

    /// Handle a raw request body. `None` means no JSON payload was supplied.
    pub async fn handle(&self, payload: Option<&[u8]>) -> TransferResponse {
        match TransferRequest::from_json_slice(payload) {
            Ok(request) => self.execute(&request).await,
            Err(e) => {
                tracing::debug!(
                    missing = ?e.missing_fields(),
                    error_code = e.error_code(),
                    "Rejected transfer request"
                );
                TransferResponse::rejected(e.http_status_code(), e.to_string())
            }
        }
    }

    /// Run a validated request to completion. Never panics and never
    /// returns an error: every outcome is mapped onto a response.
    pub async fn execute(&self, request: &TransferRequest) -> TransferResponse {
        let input = ObjectLocator::new(
            self.storage.backend_type(),
            request.bucket(),
            request.file(),
        );
        let pending = TransferResult::pending(input.to_string());

        tracing::info!(input = %input, "Received request to process video");

        let outcome = AssertUnwindSafe(self.run(request))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(AppError::Internal(panic_description(panic.as_ref()))));

        match outcome {
            Ok(Completion::Uploaded { output }) => {
                tracing::info!(input = %input, output = %output, "Transfer completed");
                TransferResponse::new(200, pending.succeed(output.to_string()))
            }
            Ok(Completion::ProcessingFailed { reason }) => {
                tracing::warn!(input = %input, reason = %reason, "Video processing failed");
                TransferResponse::new(500, pending.fail(PROCESSING_FAILED_MESSAGE))
            }
            Err(fault) => {
                log_fault(&fault);
                TransferResponse::new(
                    fault.http_status_code(),
                    pending.fail(format!("Internal server error: {}", fault)),
                )
            }
        }
    }

    #[tracing::instrument(
        skip(self, request),
        fields(bucket = %request.bucket(), file = %request.file())
    )]
    async fn run(&self, request: &TransferRequest) -> Result<Completion, AppError> {
        let scratch = ScratchArea::acquire(self.scratch_root.as_deref())?;

        let downloaded = self
            .storage
            .download_to_path(request.bucket(), request.file(), scratch.input_path())
            .await?;
        tracing::info!(
            bytes = downloaded,
            path = %scratch.input_path().display(),
            "Downloaded source video"
        );

        let outcome = self
            .processor
            .process(scratch.input_path(), scratch.output_path())
            .await
            .map_err(|e| AppError::Processing(format!("{:#}", e)))?;

        let completion = match outcome {
            ProcessOutcome::Failed { reason } => Completion::ProcessingFailed { reason },
            ProcessOutcome::Succeeded => {
                let output_key = processed_output_key(request.file());
                let uploaded = self
                    .storage
                    .upload_from_path(scratch.output_path(), request.bucket(), &output_key)
                    .await?;
                tracing::info!(
                    bytes = uploaded,
                    key = %output_key,
                    processor = self.processor.name(),
                    "Uploaded processed video"
                );
                Completion::Uploaded {
                    output: ObjectLocator::new(
                        self.storage.backend_type(),
                        request.bucket(),
                        output_key,
                    ),
                }
            }
        };

        scratch.release();
        Ok(completion)
    }
}

fn panic_description(panic: &(dyn Any + Send)) -> String {
    let detail = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string());
    format!("Transfer panicked: {}", detail)
}

fn log_fault(error: &AppError) {
    let error_code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_code = error_code, "Transfer fault");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_code = error_code, "Transfer fault");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_code = error_code, "Transfer fault");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_description_from_str() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_description(payload.as_ref()), "Transfer panicked: boom");
    }

    #[test]
    fn test_panic_description_from_string() {
        let payload: Box<dyn Any + Send> = Box::new(String::from("index out of bounds"));
        assert_eq!(
            panic_description(payload.as_ref()),
            "Transfer panicked: index out of bounds"
        );
    }

    #[test]
    fn test_panic_description_unknown_payload() {
        let payload: Box<dyn Any + Send> = Box::new(42_u32);
        assert_eq!(
            panic_description(payload.as_ref()),
            "Transfer panicked: unknown panic payload"
        );
    }
}
