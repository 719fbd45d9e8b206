//! Configuration module
//!
//! Configuration is read from environment variables (optionally seeded from a
//! `.env` file). Parsing goes through a lookup function so it can be exercised
//! in tests without touching the process environment.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::processor_types::ProcessorBackend;
use crate::storage_types::StorageBackend;

const SERVER_PORT: u16 = 8080;
const HTTP_CONCURRENCY_LIMIT: usize = 64;
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;
const STORAGE_MAX_RETRIES: usize = 3;
const STORAGE_TIMEOUT_SECS: u64 = 300;

/// Console output format for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" | "text" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub log_format: LogFormat,
    pub http_concurrency_limit: usize,
    pub max_request_body_bytes: usize,
}

/// Transfer service configuration
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub base: BaseConfig,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub gcs_service_account_path: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub local_storage_path: Option<String>,
    pub storage_max_retries: usize,
    pub storage_timeout_secs: u64,
    // Processing configuration
    pub scratch_dir: Option<PathBuf>,
    pub processor: ProcessorBackend,
    pub ffmpeg_path: String,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ServiceConfig>);

impl Config {
    fn inner(&self) -> &ServiceConfig {
        &self.0
    }

    /// Load configuration from the process environment (and `.env` if present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ServiceConfig::from_lookup(lookup)?;
        Ok(Config(Box::new(config)))
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.inner().base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn log_format(&self) -> LogFormat {
        self.inner().base.log_format
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.inner().base.http_concurrency_limit
    }

    pub fn max_request_body_bytes(&self) -> usize {
        self.inner().base.max_request_body_bytes
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.inner().storage_backend
    }

    pub fn gcs_service_account_path(&self) -> Option<&str> {
        self.inner().gcs_service_account_path.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.inner().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.inner().s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.inner().local_storage_path.as_deref()
    }

    pub fn storage_max_retries(&self) -> usize {
        self.inner().storage_max_retries
    }

    pub fn storage_timeout_secs(&self) -> u64 {
        self.inner().storage_timeout_secs
    }

    pub fn scratch_dir(&self) -> Option<&PathBuf> {
        self.inner().scratch_dir.as_ref()
    }

    pub fn processor(&self) -> ProcessorBackend {
        self.inner().processor
    }

    pub fn ffmpeg_path(&self) -> &str {
        &self.inner().ffmpeg_path
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ServiceConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server_port = match non_empty(lookup("PORT")) {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => SERVER_PORT,
        };

        let log_format = match non_empty(lookup("LOG_FORMAT")) {
            Some(format) => format.parse()?,
            None => LogFormat::default(),
        };

        let base = BaseConfig {
            server_port,
            environment,
            log_format,
            http_concurrency_limit: parse_or(
                lookup("HTTP_CONCURRENCY_LIMIT"),
                HTTP_CONCURRENCY_LIMIT,
            ),
            max_request_body_bytes: parse_or(
                lookup("MAX_REQUEST_BODY_BYTES"),
                MAX_REQUEST_BODY_BYTES,
            ),
        };

        let storage_backend = match non_empty(lookup("STORAGE_BACKEND")) {
            Some(backend) => backend.parse()?,
            None => StorageBackend::Gcs,
        };

        let processor = match non_empty(lookup("PROCESSOR")) {
            Some(processor) => processor.parse()?,
            None => ProcessorBackend::default(),
        };

        Ok(ServiceConfig {
            base,
            storage_backend,
            gcs_service_account_path: non_empty(lookup("GCS_SERVICE_ACCOUNT_PATH")),
            s3_region: non_empty(lookup("S3_REGION")).or_else(|| non_empty(lookup("AWS_REGION"))),
            s3_endpoint: non_empty(lookup("S3_ENDPOINT")),
            local_storage_path: non_empty(lookup("LOCAL_STORAGE_PATH")),
            storage_max_retries: parse_or(lookup("STORAGE_MAX_RETRIES"), STORAGE_MAX_RETRIES),
            storage_timeout_secs: parse_or(lookup("STORAGE_TIMEOUT_SECS"), STORAGE_TIMEOUT_SECS),
            scratch_dir: non_empty(lookup("SCRATCH_DIR")).map(PathBuf::from),
            processor,
            ffmpeg_path: non_empty(lookup("FFMPEG_PATH")).unwrap_or_else(|| "ffmpeg".to_string()),
        })
    }
}
