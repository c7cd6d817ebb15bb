//! Asset lifecycle orchestration.
//!
//! `create` runs validate → classify → (probe + ladder) → store → persist;
//! `delete` reverses it by walking the asset's reference set. The ordering
//! guarantees the no-orphans invariant: validation rejections write nothing,
//! the original write gates everything else, and deletion reclaims storage
//! before the record goes.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use folio_core::config::UploadPolicy;
use folio_core::models::{guess_mime, Asset, Derivative, MediaType, MetadataPatch};
use folio_storage::{keys, DeleteStatus, Storage, StorageError};

use crate::image::probe::probe_dimensions;
use crate::image::thumbnail::{generate_ladder, GeneratedThumbnail};
use crate::repository::{AssetRepository, RepositoryError};
use crate::types::{CreateOptions, CreatedAsset, DeleteReport, PipelineWarning, Upload};
use crate::validator::{UploadValidator, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    /// The upload violated policy; nothing was written anywhere.
    #[error("Upload rejected: {} violation(s)", .0.len())]
    Rejected(Vec<ValidationError>),

    /// Writing the original object failed; the create is aborted.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error("Asset not found: {0}")]
    NotFound(Uuid),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Orchestrates asset creation, deletion, and display-metadata updates
/// against a storage backend and a record store.
pub struct AssetLifecycle {
    storage: Arc<dyn Storage>,
    repository: Arc<dyn AssetRepository>,
    validator: UploadValidator,
    policy: UploadPolicy,
}

impl AssetLifecycle {
    pub fn new(
        storage: Arc<dyn Storage>,
        repository: Arc<dyn AssetRepository>,
        policy: UploadPolicy,
    ) -> Self {
        Self {
            storage,
            repository,
            validator: UploadValidator::new(policy.clone()),
            policy,
        }
    }

    /// Create an asset from an upload.
    ///
    /// Rejected uploads perform no storage writes at all. For images, all
    /// derivative bytes are generated before anything is written; a failed
    /// original write aborts the create, while failed derivative writes only
    /// drop that derivative. Absorbed failures come back as warnings on the
    /// result.
    #[tracing::instrument(
        skip(self, upload, options),
        fields(file_name = %upload.file_name, file_size = upload.size())
    )]
    pub async fn create(
        &self,
        upload: Upload,
        options: CreateOptions,
    ) -> Result<CreatedAsset, CreateError> {
        let media_type = self
            .validator
            .validate(&upload)
            .map_err(CreateError::Rejected)?;

        let asset_id = Uuid::new_v4();
        let mut warnings = Vec::new();

        let (dimensions, thumbnails) = if media_type == MediaType::Image {
            // Decode and resize are CPU-bound; run them off the async pool.
            // One decode serves all three ladder sizes.
            let data = upload.bytes.clone();
            let quality = self.policy.jpeg_quality;
            let (dimensions, ladder) = tokio::task::spawn_blocking(move || {
                let dimensions = probe_dimensions(&data);
                let ladder = generate_ladder(&data, quality);
                (dimensions, ladder)
            })
            .await
            .map_err(|e| CreateError::Internal(anyhow::Error::new(e)))?;

            if dimensions.is_none() {
                tracing::warn!("Image dimensions could not be determined");
                warnings.push(PipelineWarning::DimensionsUnavailable);
            }
            for (size_class, error) in &ladder.failures {
                warnings.push(PipelineWarning::ThumbnailFailed {
                    size_class: *size_class,
                    reason: error.to_string(),
                });
            }
            (dimensions, ladder.thumbnails)
        } else {
            (None, Vec::new())
        };

        // The original write is the gate: if it fails, nothing has been
        // stored yet and the create aborts cleanly.
        let original_key = keys::original_key(asset_id, &upload.file_name);
        let original = self.storage.put(&original_key, upload.bytes.clone()).await?;

        let derivatives = self
            .store_derivatives(asset_id, &upload.file_name, thumbnails, &mut warnings)
            .await;

        let now = Utc::now();
        let title = options
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| title_from_filename(&upload.file_name));

        let asset = Asset {
            id: asset_id,
            tenant_id: options.tenant_id,
            media_type,
            file_name: upload.file_name.clone(),
            file_size: upload.size(),
            mime_type: guess_mime(&upload.file_name).map(str::to_string),
            original,
            title,
            alt_text: options.alt_text,
            description: options.description,
            dimensions,
            derivatives,
            uploaded_by: options.uploaded_by,
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = self.repository.insert(asset.clone()).await {
            // A failed insert would orphan what was just written; reclaim it
            // before surfacing the error.
            for key in asset.storage_keys() {
                if let Err(rollback_err) = self.storage.delete(key).await {
                    tracing::warn!(key = %key, error = %rollback_err, "Rollback delete failed");
                }
            }
            return Err(CreateError::Repository(e));
        }

        tracing::info!(
            asset_id = %asset.id,
            media_type = %asset.media_type,
            derivatives = asset.derivatives.len(),
            warnings = warnings.len(),
            "Asset created"
        );

        Ok(CreatedAsset { asset, warnings })
    }

    async fn store_derivatives(
        &self,
        asset_id: Uuid,
        file_name: &str,
        thumbnails: Vec<GeneratedThumbnail>,
        warnings: &mut Vec<PipelineWarning>,
    ) -> Vec<Derivative> {
        let mut derivatives = Vec::new();
        for thumb in thumbnails {
            let key = keys::derivative_key(asset_id, thumb.size_class, file_name);
            match self.storage.put(&key, thumb.bytes).await {
                Ok(object) => derivatives.push(Derivative {
                    size_class: thumb.size_class,
                    object,
                }),
                Err(e) => {
                    tracing::warn!(
                        size_class = %thumb.size_class,
                        key = %key,
                        error = %e,
                        "Derivative write failed, continuing without it"
                    );
                    warnings.push(PipelineWarning::ThumbnailWriteFailed {
                        size_class: thumb.size_class,
                        reason: e.to_string(),
                    });
                }
            }
        }
        derivatives
    }

    /// Delete an asset and every storage object it references.
    ///
    /// Idempotent: an unknown id and already-missing objects both count as
    /// satisfied. Unexpected storage errors are collected in the report, and
    /// the record is removed regardless so a dangling record never blocks
    /// future reclamation.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, asset_id: Uuid) -> Result<DeleteReport, DeleteError> {
        let Some(asset) = self.repository.get(asset_id).await? else {
            tracing::debug!(asset_id = %asset_id, "Delete of unknown asset treated as satisfied");
            return Ok(DeleteReport {
                asset_id,
                already_absent: true,
                unreclaimed: Vec::new(),
            });
        };

        let mut unreclaimed = Vec::new();
        for key in asset.storage_keys() {
            match self.storage.delete(key).await {
                Ok(DeleteStatus::Deleted) => {}
                Ok(DeleteStatus::NotFound) => {
                    tracing::debug!(key = %key, "Object already absent during delete");
                }
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Storage delete failed, record removed anyway");
                    unreclaimed.push(key.to_string());
                }
            }
        }

        self.repository.remove(asset_id).await?;

        tracing::info!(
            asset_id = %asset_id,
            unreclaimed = unreclaimed.len(),
            "Asset deleted"
        );

        Ok(DeleteReport {
            asset_id,
            already_absent: false,
            unreclaimed,
        })
    }

    /// Update display metadata only. Binary content is write-once; a content
    /// change is delete-then-create, never an in-place mutation.
    pub async fn update_metadata(
        &self,
        asset_id: Uuid,
        patch: MetadataPatch,
    ) -> Result<Asset, UpdateError> {
        let mut asset = self
            .repository
            .get(asset_id)
            .await?
            .ok_or(UpdateError::NotFound(asset_id))?;

        asset.apply_metadata_patch(patch);
        self.repository.update(asset.clone()).await?;

        Ok(asset)
    }
}

fn title_from_filename(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| file_name.to_string())
}
