use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::storage_types::StorageBackend;

/// Fully qualified reference to an object: `scheme://bucket/key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocator {
    scheme: &'static str,
    bucket: String,
    key: String,
}

impl ObjectLocator {
    pub fn new(backend: StorageBackend, bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            scheme: backend.scheme(),
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl Display for ObjectLocator {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}://{}/{}", self.scheme, self.bucket, self.key)
    }
}
