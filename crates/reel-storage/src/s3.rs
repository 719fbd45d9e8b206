//! S3 (and S3-compatible) storage backend

use crate::object::{ClientTuning, ObjectStoreStorage};
use crate::traits::{StorageError, StorageResult};
use crate::StorageBackend;
use object_store::aws::AmazonS3Builder;
use object_store::ObjectStore;
use std::sync::Arc;

/// S3 connection settings.
#[derive(Debug, Clone, Default)]
pub struct S3Options {
    /// AWS region (or region identifier for S3-compatible providers)
    pub region: String,
    /// Optional custom endpoint for S3-compatible providers
    /// (e.g., "http://localhost:9000" for MinIO)
    pub endpoint_url: Option<String>,
    pub tuning: ClientTuning,
}

impl ObjectStoreStorage {
    pub fn s3(options: S3Options) -> Self {
        ObjectStoreStorage::from_factory(StorageBackend::S3, move |bucket| {
            build_bucket_store(&options, bucket)
        })
    }
}

fn build_bucket_store(options: &S3Options, bucket: &str) -> StorageResult<Arc<dyn ObjectStore>> {
    // Credentials come from the environment (AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY, ...)
    let mut builder = AmazonS3Builder::from_env()
        .with_region(options.region.clone())
        .with_bucket_name(bucket)
        .with_client_options(options.tuning.client_options())
        .with_retry(options.tuning.retry_config());

    if let Some(ref endpoint) = options.endpoint_url {
        let allow_http = endpoint.starts_with("http://");
        builder = builder
            .with_endpoint(endpoint.clone())
            .with_allow_http(allow_http);
    }

    let store = builder
        .build()
        .map_err(|e| StorageError::ConfigError(e.to_string()))?;

    Ok(Arc::new(store))
}
