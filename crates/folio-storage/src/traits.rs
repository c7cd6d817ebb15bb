//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must
//! implement. The pipeline only ever addresses objects through it.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use folio_core::models::StorageObject;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Outcome of a delete. A missing object is a distinct, non-error outcome:
/// deletion is idempotent and an already-gone object counts as reclaimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteStatus {
    Deleted,
    NotFound,
}

/// Storage abstraction trait
///
/// All storage backends must implement this trait so the lifecycle manager
/// can work with any backend without coupling to implementation details.
///
/// **Key format:** keys are asset-scoped, `media/{asset_id}/{filename}`.
/// See the crate root documentation and the `keys` module.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write an object and return its reference (key + serving URL).
    async fn put(&self, key: &str, data: Bytes) -> StorageResult<StorageObject>;

    /// Delete an object by key. Missing objects report `NotFound`, not an
    /// error.
    async fn delete(&self, key: &str) -> StorageResult<DeleteStatus>;

    /// Check whether an object exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Read an object's bytes.
    async fn download(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// The backend type this storage implements.
    fn backend_type(&self) -> folio_core::models::StorageBackend;
}
