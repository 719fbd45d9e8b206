//! In-memory storage double that counts calls

use async_trait::async_trait;
use reel_storage::{Storage, StorageBackend, StorageError, StorageResult};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

pub struct RecordingStorage {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    backend_type: StorageBackend,
    downloads: AtomicUsize,
    uploads: AtomicUsize,
    fail_downloads: AtomicBool,
    fail_uploads: AtomicBool,
}

impl RecordingStorage {
    pub fn new() -> Self {
        Self::with_backend(StorageBackend::Gcs)
    }

    pub fn with_backend(backend_type: StorageBackend) -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            backend_type,
            downloads: AtomicUsize::new(0),
            uploads: AtomicUsize::new(0),
            fail_downloads: AtomicBool::new(false),
            fail_uploads: AtomicBool::new(false),
        }
    }

    /// Seed an object
    pub fn put_object(&self, bucket: &str, key: &str, data: &[u8]) {
        self.objects
            .lock()
            .unwrap()
            .insert(object_id(bucket, key), data.to_vec());
    }

    /// Get object data (for test assertions)
    pub fn get_object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(&object_id(bucket, key))
            .cloned()
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn downloads(&self) -> usize {
        self.downloads.load(Ordering::SeqCst)
    }

    pub fn uploads(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    /// Make every download fail with a backend error
    pub fn fail_downloads(&self) {
        self.fail_downloads.store(true, Ordering::SeqCst);
    }

    /// Make every upload fail with an upload error
    pub fn fail_uploads(&self) {
        self.fail_uploads.store(true, Ordering::SeqCst);
    }
}

impl Default for RecordingStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn object_id(bucket: &str, key: &str) -> String {
    format!("{}/{}", bucket, key)
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn download_to_path(&self, bucket: &str, key: &str, dest: &Path) -> StorageResult<u64> {
        self.downloads.fetch_add(1, Ordering::SeqCst);
        if self.fail_downloads.load(Ordering::SeqCst) {
            return Err(StorageError::BackendError("connection reset".to_string()));
        }

        let data = self
            .objects
            .lock()
            .unwrap()
            .get(&object_id(bucket, key))
            .cloned()
            .ok_or_else(|| StorageError::NotFound(object_id(bucket, key)))?;

        tokio::fs::write(dest, &data).await?;
        Ok(data.len() as u64)
    }

    async fn upload_from_path(&self, src: &Path, bucket: &str, key: &str) -> StorageResult<u64> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed("quota exceeded".to_string()));
        }

        let data = tokio::fs::read(src).await?;
        let size = data.len() as u64;
        self.objects
            .lock()
            .unwrap()
            .insert(object_id(bucket, key), data);
        Ok(size)
    }

    fn backend_type(&self) -> StorageBackend {
        self.backend_type
    }
}
