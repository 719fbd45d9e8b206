//! Configuration validation
//!
//! Catches misconfigurations at startup instead of on the first request.

use anyhow::{Context, Result};
use reel_core::{Config, StorageBackend};

/// Validate critical configuration values
///
/// Creates the scratch root when one is configured, since every request
/// needs it.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.http_concurrency_limit() == 0 {
        return Err(anyhow::anyhow!("HTTP_CONCURRENCY_LIMIT cannot be 0"));
    }

    if config.max_request_body_bytes() == 0 {
        return Err(anyhow::anyhow!("MAX_REQUEST_BODY_BYTES cannot be 0"));
    }

    if config.storage_timeout_secs() == 0 {
        return Err(anyhow::anyhow!("STORAGE_TIMEOUT_SECS cannot be 0"));
    }

    match config.storage_backend() {
        StorageBackend::S3 if config.s3_region().is_none() => {
            return Err(anyhow::anyhow!(
                "S3_REGION or AWS_REGION must be set when using S3 storage backend"
            ));
        }
        StorageBackend::Local if config.local_storage_path().is_none() => {
            return Err(anyhow::anyhow!(
                "LOCAL_STORAGE_PATH must be set when using local storage backend"
            ));
        }
        StorageBackend::Local if config.is_production() => {
            tracing::warn!("Local storage backend in production - objects live on this host only");
        }
        _ => {}
    }

    if let Some(path) = config.gcs_service_account_path() {
        if config.storage_backend() == StorageBackend::Gcs && !std::path::Path::new(path).is_file() {
            return Err(anyhow::anyhow!(
                "GCS_SERVICE_ACCOUNT_PATH does not point to a file: {}",
                path
            ));
        }
    }

    if let Some(scratch_dir) = config.scratch_dir() {
        std::fs::create_dir_all(scratch_dir).with_context(|| {
            format!("Failed to create scratch directory {}", scratch_dir.display())
        })?;
    }

    Ok(())
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

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&config_from(&[])).is_ok());
    }

    #[test]
    fn test_s3_requires_region() {
        let result = validate_config(&config_from(&[("STORAGE_BACKEND", "s3")]));
        assert!(result.is_err());

        let result = validate_config(&config_from(&[
            ("STORAGE_BACKEND", "s3"),
            ("S3_REGION", "eu-west-1"),
        ]));
        assert!(result.is_ok());
    }

    #[test]
    fn test_local_requires_path() {
        let result = validate_config(&config_from(&[("STORAGE_BACKEND", "local")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_service_account_file_is_rejected() {
        let result = validate_config(&config_from(&[(
            "GCS_SERVICE_ACCOUNT_PATH",
            "/nonexistent/credentials.json",
        )]));
        assert!(result.is_err());
    }

    #[test]
    fn test_scratch_dir_is_created() {
        let root = tempfile::tempdir().unwrap();
        let scratch = root.path().join("nested").join("scratch");
        let scratch_str = scratch.to_str().unwrap().to_string();

        validate_config(&config_from(&[("SCRATCH_DIR", scratch_str.as_str())])).unwrap();
        assert!(scratch.is_dir());
    }
}
