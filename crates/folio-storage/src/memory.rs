//! In-memory storage backend.
//!
//! Holds objects in a map behind a lock. Used by tests and by deployments
//! that want a throwaway backend; supports injecting write/delete failures
//! for exercising the pipeline's degradation paths.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;

use crate::traits::{DeleteStatus, Storage, StorageError, StorageResult};
use folio_core::models::{StorageBackend, StorageObject};

#[derive(Default)]
struct FailureRules {
    put_fragments: Vec<String>,
    delete_fragments: Vec<String>,
}

/// Map-backed storage. Cheap to construct, no I/O.
pub struct MemoryStorage {
    base_url: String,
    objects: RwLock<HashMap<String, Bytes>>,
    failures: RwLock<FailureRules>,
}

impl MemoryStorage {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: RwLock::new(HashMap::new()),
            failures: RwLock::new(FailureRules::default()),
        }
    }

    /// Make every `put` whose key contains `fragment` fail with a backend
    /// error.
    pub fn fail_puts_containing(&self, fragment: impl Into<String>) {
        self.failures
            .write()
            .expect("failure rules lock poisoned")
            .put_fragments
            .push(fragment.into());
    }

    /// Make every `delete` whose key contains `fragment` fail with a backend
    /// error.
    pub fn fail_deletes_containing(&self, fragment: impl Into<String>) {
        self.failures
            .write()
            .expect("failure rules lock poisoned")
            .delete_fragments
            .push(fragment.into());
    }

    /// Number of objects currently held.
    pub fn object_count(&self) -> usize {
        self.objects.read().expect("object map lock poisoned").len()
    }

    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    fn check_key(key: &str) -> StorageResult<()> {
        if key.contains("..") || key.starts_with('/') || key.is_empty() {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn put(&self, key: &str, data: Bytes) -> StorageResult<StorageObject> {
        Self::check_key(key)?;

        let injected = {
            let rules = self.failures.read().expect("failure rules lock poisoned");
            rules.put_fragments.iter().any(|f| key.contains(f.as_str()))
        };
        if injected {
            return Err(StorageError::BackendError(format!(
                "injected put failure for key {}",
                key
            )));
        }

        self.objects
            .write()
            .expect("object map lock poisoned")
            .insert(key.to_string(), data);

        tracing::debug!(key = %key, "Memory storage put successful");

        Ok(StorageObject {
            key: key.to_string(),
            url: self.generate_url(key),
        })
    }

    async fn delete(&self, key: &str) -> StorageResult<DeleteStatus> {
        Self::check_key(key)?;

        let injected = {
            let rules = self.failures.read().expect("failure rules lock poisoned");
            rules
                .delete_fragments
                .iter()
                .any(|f| key.contains(f.as_str()))
        };
        if injected {
            return Err(StorageError::BackendError(format!(
                "injected delete failure for key {}",
                key
            )));
        }

        let removed = self
            .objects
            .write()
            .expect("object map lock poisoned")
            .remove(key);

        Ok(if removed.is_some() {
            DeleteStatus::Deleted
        } else {
            DeleteStatus::NotFound
        })
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Self::check_key(key)?;
        Ok(self
            .objects
            .read()
            .expect("object map lock poisoned")
            .contains_key(key))
    }

    async fn download(&self, key: &str) -> StorageResult<Vec<u8>> {
        Self::check_key(key)?;
        self.objects
            .read()
            .expect("object map lock poisoned")
            .get(key)
            .map(|b| b.to_vec())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
