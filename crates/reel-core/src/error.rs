//! Error types module
//!
//! Faults raised while a transfer is running are unified under [`AppError`].
//! Request validation failures are not faults; they are reported through
//! [`crate::models::RequestValidationError`] before any side effect happens.

use crate::models::RequestValidationError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error is surfaced to callers and logs.
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORAGE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Scratch area error: {0}")]
    Scratch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Internal(String),
}

impl ErrorMetadata for AppError {
    /// Every fault surfaces as 500; bad requests never become an `AppError`.
    fn http_status_code(&self) -> u16 {
        500
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Processing(_) => "PROCESSING_ERROR",
            AppError::Scratch(_) => "SCRATCH_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::Storage(_) => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}

impl ErrorMetadata for RequestValidationError {
    fn http_status_code(&self) -> u16 {
        400
    }

    fn error_code(&self) -> &'static str {
        "INVALID_INPUT"
    }

    fn log_level(&self) -> LogLevel {
        LogLevel::Debug
    }
}
