//! Policy configuration for the media pipeline.
//!
//! Limits and the thumbnail ladder are process-wide constants with optional
//! environment overrides; they are plain data, not shared mutable state.

use std::env;
use std::str::FromStr;

use crate::models::StorageBackend;

const MIB: u64 = 1024 * 1024;

/// Default maximum upload size for any file.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * MIB;
/// Default maximum upload size for images, which get the stricter limit.
pub const DEFAULT_MAX_IMAGE_SIZE: u64 = 5 * MIB;
/// JPEG quality used for every generated derivative.
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// Upload acceptance and derivative-encoding policy.
#[derive(Clone, Debug)]
pub struct UploadPolicy {
    pub max_file_size: u64,
    pub max_image_size: u64,
    pub jpeg_quality: u8,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_image_size: DEFAULT_MAX_IMAGE_SIZE,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl UploadPolicy {
    /// Build the policy from environment variables, falling back to the
    /// compiled defaults for anything unset or unparsable.
    ///
    /// Recognized variables: `FOLIO_MAX_FILE_SIZE`, `FOLIO_MAX_IMAGE_SIZE`
    /// (bytes), `FOLIO_JPEG_QUALITY` (1-100).
    pub fn from_env() -> Self {
        Self {
            max_file_size: env_parsed("FOLIO_MAX_FILE_SIZE", DEFAULT_MAX_FILE_SIZE),
            max_image_size: env_parsed("FOLIO_MAX_IMAGE_SIZE", DEFAULT_MAX_IMAGE_SIZE),
            jpeg_quality: env_parsed("FOLIO_JPEG_QUALITY", DEFAULT_JPEG_QUALITY),
        }
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_file_size == 0 {
            anyhow::bail!("max_file_size must be positive");
        }
        if self.max_image_size > self.max_file_size {
            anyhow::bail!(
                "max_image_size ({}) exceeds max_file_size ({})",
                self.max_image_size,
                self.max_file_size
            );
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            anyhow::bail!("jpeg_quality must be in 1..=100");
        }
        Ok(())
    }
}

/// Storage backend selection and location.
#[derive(Clone, Debug)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Root directory for the local backend.
    pub local_path: Option<String>,
    /// Base URL objects are served under.
    pub base_url: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Local,
            local_path: None,
            base_url: "http://localhost:3000/media".to_string(),
        }
    }
}

impl StorageSettings {
    /// Recognized variables: `FOLIO_STORAGE_BACKEND` (`local`|`memory`),
    /// `FOLIO_STORAGE_PATH`, `FOLIO_STORAGE_BASE_URL`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: env_parsed("FOLIO_STORAGE_BACKEND", defaults.backend),
            local_path: env::var("FOLIO_STORAGE_PATH").ok().or(defaults.local_path),
            base_url: env::var("FOLIO_STORAGE_BASE_URL").unwrap_or(defaults.base_url),
        }
    }
}

fn env_parsed<T: FromStr + Copy>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(var = name, value = %raw, "Unparsable env override, using default");
                default
            }
        },
        Err(_) => default,
    }
}
