#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(any(feature = "storage-gcs", feature = "storage-s3"))]
use crate::{ClientTuning, ObjectStoreStorage};
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use reel_core::Config;
use std::sync::Arc;

#[cfg(any(feature = "storage-gcs", feature = "storage-s3"))]
fn client_tuning(config: &Config) -> ClientTuning {
    ClientTuning {
        max_retries: config.storage_max_retries(),
        timeout: std::time::Duration::from_secs(config.storage_timeout_secs()),
    }
}

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend() {
        #[cfg(feature = "storage-gcs")]
        StorageBackend::Gcs => {
            let storage = ObjectStoreStorage::gcs(crate::GcsOptions {
                service_account_path: config.gcs_service_account_path().map(String::from),
                tuning: client_tuning(config),
            });
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-gcs"))]
        StorageBackend::Gcs => Err(StorageError::ConfigError(
            "GCS storage backend not available (storage-gcs feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let region = config.s3_region().map(String::from).ok_or_else(|| {
                StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
            })?;
            let storage = ObjectStoreStorage::s3(crate::S3Options {
                region,
                endpoint_url: config.s3_endpoint().map(String::from),
                tuning: client_tuning(config),
            });
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config.local_storage_path().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;
            let storage = LocalStorage::new(base_path).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    #[tokio::test]
    async fn test_default_backend_is_gcs() {
        let storage = create_storage(&config_from(&[])).await.unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::Gcs);
    }

    #[tokio::test]
    async fn test_s3_requires_region() {
        let result = create_storage(&config_from(&[("STORAGE_BACKEND", "s3")])).await;
        assert!(matches!(result, Err(StorageError::ConfigError(_))));

        let storage = create_storage(&config_from(&[
            ("STORAGE_BACKEND", "s3"),
            ("S3_REGION", "us-east-1"),
        ]))
        .await
        .unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::S3);
    }

    #[tokio::test]
    async fn test_local_backend() {
        let result = create_storage(&config_from(&[("STORAGE_BACKEND", "local")])).await;
        assert!(matches!(result, Err(StorageError::ConfigError(_))));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_string_lossy().to_string();
        let storage = create_storage(&config_from(&[
            ("STORAGE_BACKEND", "local"),
            ("LOCAL_STORAGE_PATH", &path),
        ]))
        .await
        .unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::Local);
    }
}
