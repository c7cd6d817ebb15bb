//! Asset record store.
//!
//! The record store is an external collaborator of the pipeline: the
//! lifecycle manager only needs per-record insert/get/update/remove with
//! per-record atomicity. The in-memory implementation here is the default
//! for tests and embedding; persistent backends implement the same trait.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use folio_core::models::Asset;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Asset already exists: {0}")]
    Conflict(Uuid),

    #[error("Asset not found: {0}")]
    NotFound(Uuid),

    #[error("Repository backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait AssetRepository: Send + Sync {
    /// Insert a new record. Fails on id collision.
    async fn insert(&self, asset: Asset) -> Result<(), RepositoryError>;

    /// Fetch a record by id.
    async fn get(&self, id: Uuid) -> Result<Option<Asset>, RepositoryError>;

    /// Replace an existing record.
    async fn update(&self, asset: Asset) -> Result<(), RepositoryError>;

    /// Remove a record, returning it if it existed.
    async fn remove(&self, id: Uuid) -> Result<Option<Asset>, RepositoryError>;
}

/// Map-backed repository.
#[derive(Default)]
pub struct InMemoryAssetRepository {
    assets: RwLock<HashMap<Uuid, Asset>>,
}

impl InMemoryAssetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.assets.read().expect("asset map lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AssetRepository for InMemoryAssetRepository {
    async fn insert(&self, asset: Asset) -> Result<(), RepositoryError> {
        let mut assets = self.assets.write().expect("asset map lock poisoned");
        if assets.contains_key(&asset.id) {
            return Err(RepositoryError::Conflict(asset.id));
        }
        assets.insert(asset.id, asset);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Asset>, RepositoryError> {
        Ok(self
            .assets
            .read()
            .expect("asset map lock poisoned")
            .get(&id)
            .cloned())
    }

    async fn update(&self, asset: Asset) -> Result<(), RepositoryError> {
        let mut assets = self.assets.write().expect("asset map lock poisoned");
        if !assets.contains_key(&asset.id) {
            return Err(RepositoryError::NotFound(asset.id));
        }
        assets.insert(asset.id, asset);
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<Option<Asset>, RepositoryError> {
        Ok(self
            .assets
            .write()
            .expect("asset map lock poisoned")
            .remove(&id))
    }
}
