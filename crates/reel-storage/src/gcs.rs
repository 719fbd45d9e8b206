//! Google Cloud Storage backend

use crate::object::{ClientTuning, ObjectStoreStorage};
use crate::traits::{StorageError, StorageResult};
use crate::StorageBackend;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::ObjectStore;
use std::sync::Arc;

/// GCS connection settings.
///
/// Credentials are resolved from the environment (`GOOGLE_SERVICE_ACCOUNT`,
/// `GOOGLE_APPLICATION_CREDENTIALS` or the metadata server) unless an explicit
/// service account file is given.
#[derive(Debug, Clone, Default)]
pub struct GcsOptions {
    pub service_account_path: Option<String>,
    pub tuning: ClientTuning,
}

impl ObjectStoreStorage {
    pub fn gcs(options: GcsOptions) -> Self {
        ObjectStoreStorage::from_factory(StorageBackend::Gcs, move |bucket| {
            build_bucket_store(&options, bucket)
        })
    }
}

fn build_bucket_store(options: &GcsOptions, bucket: &str) -> StorageResult<Arc<dyn ObjectStore>> {
    let mut builder = GoogleCloudStorageBuilder::from_env()
        .with_bucket_name(bucket)
        .with_client_options(options.tuning.client_options())
        .with_retry(options.tuning.retry_config());

    if let Some(ref path) = options.service_account_path {
        builder = builder.with_service_account_path(path);
    }

    let store = builder
        .build()
        .map_err(|e| StorageError::ConfigError(e.to_string()))?;

    Ok(Arc::new(store))
}
