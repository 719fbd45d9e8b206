//! Transfer request and result models
//!
//! A [`TransferRequest`] only exists once the inbound payload has been fully
//! validated. A [`TransferResult`] can only be built through constructors that
//! keep `success` and `output_file` consistent: a successful result always
//! names its output object and a failed one never does.

use serde::Serialize;
use serde_json::Value;

pub const SUCCESS_MESSAGE: &str = "Video processed and uploaded successfully.";
pub const PROCESSING_FAILED_MESSAGE: &str = "Video processing failed.";

/// Inbound payload failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestValidationError {
    #[error("Missing 'bucket' or 'file' in request body (missing: {}).", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

impl RequestValidationError {
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            RequestValidationError::MissingFields(fields) => fields,
        }
    }
}

/// A validated request to transfer `bucket/file` through the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    bucket: String,
    file: String,
}

impl TransferRequest {
    /// Validate a raw JSON payload.
    ///
    /// `None`, unparseable JSON and non-object JSON are all treated as an
    /// absent payload. `bucket` and `file` must be non-empty strings.
    pub fn from_json_slice(body: Option<&[u8]>) -> Result<Self, RequestValidationError> {
        let value = body.and_then(|bytes| serde_json::from_slice::<Value>(bytes).ok());
        Self::from_value(value.as_ref())
    }

    pub fn from_value(value: Option<&Value>) -> Result<Self, RequestValidationError> {
        let object = value.and_then(Value::as_object);
        let field = |name: &str| {
            object
                .and_then(|map| map.get(name))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        match (field("bucket"), field("file")) {
            (Some(bucket), Some(file)) => Ok(Self { bucket, file }),
            (bucket, file) => {
                let mut missing = Vec::new();
                if bucket.is_none() {
                    missing.push("bucket");
                }
                if file.is_none() {
                    missing.push("file");
                }
                Err(RequestValidationError::MissingFields(missing))
            }
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn file(&self) -> &str {
        &self.file
    }
}

/// Response body for a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferResult {
    success: bool,
    input_file: Option<String>,
    output_file: Option<String>,
    message: String,
}

impl TransferResult {
    /// Result for a request rejected before any object was referenced.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            input_file: None,
            output_file: None,
            message: message.into(),
        }
    }

    /// Start a transfer whose input object is known.
    pub fn pending(input_file: impl Into<String>) -> PendingTransfer {
        PendingTransfer {
            input_file: input_file.into(),
        }
    }
}

/// A transfer in flight. Consumed exactly once by [`succeed`](Self::succeed)
/// or [`fail`](Self::fail).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransfer {
    input_file: String,
}

impl PendingTransfer {
    pub fn succeed(self, output_file: impl Into<String>) -> TransferResult {
        TransferResult {
            success: true,
            input_file: Some(self.input_file),
            output_file: Some(output_file.into()),
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn fail(self, message: impl Into<String>) -> TransferResult {
        TransferResult {
            success: false,
            input_file: Some(self.input_file),
            output_file: None,
            message: message.into(),
        }
    }
}
