//! Reel Core Library
//!
//! This crate provides the domain models, error types and configuration
//! shared by the storage, processing and API crates.

pub mod config;
pub mod error;
pub mod models;
pub mod processor_types;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, LogFormat, ServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    ObjectLocator, PendingTransfer, RequestValidationError, TransferRequest, TransferResult,
};
pub use processor_types::ProcessorBackend;
pub use storage_types::StorageBackend;
