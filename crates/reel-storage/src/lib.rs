//! Reel Storage Library
//!
//! This crate provides the object-store capability used by the transfer
//! service: the [`Storage`] trait and implementations for Google Cloud
//! Storage, S3 and the local filesystem.
//!
//! # Object addressing
//!
//! Every operation is addressed by `(bucket, key)`. Buckets are chosen per
//! request, so a single [`Storage`] handle serves any number of buckets.
//! Processed outputs are written under the key produced by
//! [`keys::processed_output_key`].

pub mod factory;
#[cfg(feature = "storage-gcs")]
pub mod gcs;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(any(feature = "storage-gcs", feature = "storage-s3"))]
pub mod object;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-gcs")]
pub use gcs::GcsOptions;
pub use keys::{processed_output_key, strip_extension};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(any(feature = "storage-gcs", feature = "storage-s3"))]
pub use object::{ClientTuning, ObjectStoreStorage};
pub use reel_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Options;
pub use traits::{Storage, StorageError, StorageResult};
