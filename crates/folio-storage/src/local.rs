use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::traits::{DeleteStatus, Storage, StorageError, StorageResult};
use folio_core::models::{StorageBackend, StorageObject};

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for object storage (e.g., "/var/lib/folio/media")
    /// * `base_url` - Base URL for serving objects (e.g., "http://localhost:3000/media")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Convert a storage key to a filesystem path, rejecting keys that could
    /// escape the base directory.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.contains("..") || key.starts_with('/') || key.is_empty() {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }
        Ok(self.base_path.join(key))
    }

    /// Generate the public URL for a key.
    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put(&self, key: &str, data: Bytes) -> StorageResult<StorageObject> {
        let path = self.key_to_path(key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage put successful"
        );

        Ok(StorageObject {
            key: key.to_string(),
            url: self.generate_url(key),
        })
    }

    async fn delete(&self, key: &str) -> StorageResult<DeleteStatus> {
        let path = self.key_to_path(key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(DeleteStatus::NotFound);
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(path = %path.display(), key = %key, "Local storage delete successful");

        Ok(DeleteStatus::Deleted)
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn download(&self, key: &str) -> StorageResult<Vec<u8>> {
        let path = self.key_to_path(key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(key.to_string()));
        }

        fs::read(&path).await.map_err(|e| {
            StorageError::ReadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn test_storage(dir: &tempfile::TempDir) -> LocalStorage {
        LocalStorage::new(dir.path(), "http://localhost:3000/media".to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_put_download_roundtrip() {
        let dir = tempdir().unwrap();
        let storage = test_storage(&dir).await;

        let data = Bytes::from_static(b"test data");
        let object = storage.put("media/abc/test.txt", data.clone()).await.unwrap();

        assert_eq!(object.key, "media/abc/test.txt");
        assert!(object.url.ends_with("media/abc/test.txt"));

        let downloaded = storage.download(&object.key).await.unwrap();
        assert_eq!(downloaded, data.to_vec());
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = test_storage(&dir).await;

        let result = storage.download("../../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.delete("../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.exists("/etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_reports_not_found() {
        let dir = tempdir().unwrap();
        let storage = test_storage(&dir).await;

        let status = storage.delete("media/abc/nothing.txt").await.unwrap();
        assert_eq!(status, DeleteStatus::NotFound);
    }

    #[tokio::test]
    async fn test_delete_then_exists() {
        let dir = tempdir().unwrap();
        let storage = test_storage(&dir).await;

        let object = storage
            .put("media/abc/gone.txt", Bytes::from_static(b"x"))
            .await
            .unwrap();
        assert!(storage.exists(&object.key).await.unwrap());

        assert_eq!(
            storage.delete(&object.key).await.unwrap(),
            DeleteStatus::Deleted
        );
        assert!(!storage.exists(&object.key).await.unwrap());

        // second delete is satisfied, not an error
        assert_eq!(
            storage.delete(&object.key).await.unwrap(),
            DeleteStatus::NotFound
        );
    }
}
