//! `object_store`-backed storage shared by the GCS and S3 backends.
//!
//! One client is built per bucket on first use and kept for the lifetime of
//! the handle, so credentials and connection pools are reused across requests.

use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use futures::StreamExt;
use object_store::path::{Path as ObjectPath, DELIMITER};
use object_store::Error as ObjectStoreError;
use object_store::{
    BackoffConfig, ClientOptions, ObjectStore, ObjectStoreExt, RetryConfig, WriteMultipart,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::RwLock;

const READ_BUFFER_BYTES: usize = 1024 * 1024;
const MAX_IN_FLIGHT_PARTS: usize = 4;

/// Builds the client for one bucket.
pub type BucketStoreFactory =
    dyn Fn(&str) -> StorageResult<Arc<dyn ObjectStore>> + Send + Sync + 'static;

/// HTTP client and retry settings applied to every bucket client.
#[derive(Debug, Clone, Copy)]
pub struct ClientTuning {
    pub max_retries: usize,
    pub timeout: Duration,
}

impl Default for ClientTuning {
    fn default() -> Self {
        Self {
            max_retries: 3,
            timeout: Duration::from_secs(300),
        }
    }
}

impl ClientTuning {
    pub(crate) fn client_options(&self) -> ClientOptions {
        ClientOptions::new()
            .with_connect_timeout(Duration::from_secs(5))
            .with_timeout(self.timeout)
            .with_pool_idle_timeout(Duration::from_secs(90))
    }

    pub(crate) fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_retries: self.max_retries,
            backoff: BackoffConfig {
                init_backoff: Duration::from_millis(100),
                max_backoff: Duration::from_secs(10),
                base: 2.0,
            },
            retry_timeout: self.timeout,
        }
    }
}

/// Storage over any `object_store` implementation, addressed per bucket.
pub struct ObjectStoreStorage {
    backend: StorageBackend,
    factory: Arc<BucketStoreFactory>,
    stores: RwLock<HashMap<String, Arc<dyn ObjectStore>>>,
}

impl ObjectStoreStorage {
    /// Create a storage handle that builds bucket clients with `factory`.
    pub fn from_factory<F>(backend: StorageBackend, factory: F) -> Self
    where
        F: Fn(&str) -> StorageResult<Arc<dyn ObjectStore>> + Send + Sync + 'static,
    {
        Self {
            backend,
            factory: Arc::new(factory),
            stores: RwLock::new(HashMap::new()),
        }
    }

    async fn store_for(&self, bucket: &str) -> StorageResult<Arc<dyn ObjectStore>> {
        if bucket.is_empty() || bucket.contains('/') {
            return Err(StorageError::InvalidKey(format!(
                "Invalid bucket name: {:?}",
                bucket
            )));
        }

        if let Some(store) = self.stores.read().await.get(bucket) {
            return Ok(store.clone());
        }

        let mut stores = self.stores.write().await;
        if let Some(store) = stores.get(bucket) {
            return Ok(store.clone());
        }

        let store = (self.factory)(bucket)?;
        tracing::debug!(
            backend = %self.backend,
            bucket = %bucket,
            "Object store client created"
        );
        stores.insert(bucket.to_string(), store.clone());
        Ok(store)
    }

    /// Map a key onto an object path without re-encoding it.
    ///
    /// Keys the object path cannot hold verbatim (empty segments, leading or
    /// trailing `/`, `.`/`..` segments, control characters) are rejected so
    /// that a request never reads or writes a different object.
    fn location(key: &str) -> StorageResult<ObjectPath> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
        }
        if key.starts_with(DELIMITER) || key.ends_with(DELIMITER) {
            return Err(StorageError::InvalidKey(format!(
                "Storage key has a leading or trailing '/': {:?}",
                key
            )));
        }
        ObjectPath::parse(key)
            .map_err(|e| StorageError::InvalidKey(format!("Unsupported storage key: {}", e)))
    }
}

#[async_trait]
impl Storage for ObjectStoreStorage {
    async fn download_to_path(&self, bucket: &str, key: &str, dest: &Path) -> StorageResult<u64> {
        let start = std::time::Instant::now();
        let store = self.store_for(bucket).await?;
        let location = Self::location(key)?;

        let result = store.get(&location).await.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => {
                StorageError::NotFound(format!("{}/{}", bucket, key))
            }
            other => {
                tracing::error!(
                    error = %other,
                    backend = %self.backend,
                    bucket = %bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Object download failed"
                );
                StorageError::DownloadFailed(other.to_string())
            }
        })?;

        let mut file = tokio::fs::File::create(dest).await.map_err(|e| {
            StorageError::DownloadFailed(format!(
                "Failed to create file {}: {}",
                dest.display(),
                e
            ))
        })?;

        let mut stream = result.into_stream();
        let mut written: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                tracing::error!(
                    error = %e,
                    backend = %self.backend,
                    bucket = %bucket,
                    key = %key,
                    bytes_written = written,
                    "Object download stream error"
                );
                StorageError::DownloadFailed(e.to_string())
            })?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.sync_all().await?;

        tracing::info!(
            backend = %self.backend,
            bucket = %bucket,
            key = %key,
            size_bytes = written,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Object download successful"
        );

        Ok(written)
    }

    async fn upload_from_path(&self, src: &Path, bucket: &str, key: &str) -> StorageResult<u64> {
        let start = std::time::Instant::now();
        let store = self.store_for(bucket).await?;
        let location = Self::location(key)?;

        let mut file = tokio::fs::File::open(src).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to open file {}: {}", src.display(), e))
        })?;

        let upload = store.put_multipart(&location).await.map_err(|e| {
            tracing::error!(
                error = %e,
                backend = %self.backend,
                bucket = %bucket,
                key = %key,
                "Failed to start object upload"
            );
            StorageError::UploadFailed(e.to_string())
        })?;
        let mut writer = WriteMultipart::new(upload);

        let size = match stream_file(&mut file, &mut writer).await {
            Ok(size) => size,
            Err(e) => {
                if let Err(abort_err) = writer.abort().await {
                    tracing::warn!(
                        error = %abort_err,
                        bucket = %bucket,
                        key = %key,
                        "Failed to abort object upload"
                    );
                }
                tracing::error!(
                    error = %e,
                    backend = %self.backend,
                    bucket = %bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Object upload failed"
                );
                return Err(e);
            }
        };

        writer.finish().await.map_err(|e| {
            tracing::error!(
                error = %e,
                backend = %self.backend,
                bucket = %bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Object upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            backend = %self.backend,
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Object upload successful"
        );

        Ok(size)
    }

    fn backend_type(&self) -> StorageBackend {
        self.backend
    }
}

/// Feed `file` into `writer` one read buffer at a time, holding at most
/// `MAX_IN_FLIGHT_PARTS` parts in memory.
async fn stream_file(
    file: &mut tokio::fs::File,
    writer: &mut WriteMultipart,
) -> StorageResult<u64> {
    let mut buf = vec![0u8; READ_BUFFER_BYTES];
    let mut total: u64 = 0;
    loop {
        writer
            .wait_for_capacity(MAX_IN_FLIGHT_PARTS)
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        let read = file.read(&mut buf).await?;
        if read == 0 {
            return Ok(total);
        }
        writer.write(&buf[..read]);
        total += read as u64;
    }
}
