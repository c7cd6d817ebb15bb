//! Storage backend factory.

use std::sync::Arc;

use crate::local::LocalStorage;
use crate::memory::MemoryStorage;
use crate::traits::{Storage, StorageError, StorageResult};
use folio_core::config::StorageSettings;
use folio_core::models::StorageBackend;

/// Build the configured storage backend.
pub async fn create_storage(settings: &StorageSettings) -> StorageResult<Arc<dyn Storage>> {
    match settings.backend {
        StorageBackend::Local => {
            let path = settings.local_path.as_deref().ok_or_else(|| {
                StorageError::ConfigError(
                    "local storage backend requires FOLIO_STORAGE_PATH".to_string(),
                )
            })?;
            let storage = LocalStorage::new(path, settings.base_url.clone()).await?;
            tracing::info!(path = %path, "Using local storage backend");
            Ok(Arc::new(storage))
        }
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage backend");
            Ok(Arc::new(MemoryStorage::new(settings.base_url.clone())))
        }
    }
}
