//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use reel_core::AppError;
use std::path::Path;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConfigError(message) => AppError::Config(message),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Storage abstraction trait
///
/// A single handle is shared by every in-flight request, so implementations
/// must be safe for concurrent use. Implementations never retry on their own
/// behalf beyond what the underlying client is configured to do.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Download `bucket/key` into the local file at `dest`, returning the
    /// number of bytes written.
    ///
    /// Missing objects are reported as [`StorageError::NotFound`].
    async fn download_to_path(&self, bucket: &str, key: &str, dest: &Path) -> StorageResult<u64>;

    /// Upload the local file at `src` to `bucket/key`, returning the number
    /// of bytes uploaded.
    async fn upload_from_path(&self, src: &Path, bucket: &str, key: &str) -> StorageResult<u64>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
