use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::derivative::{Derivative, SizeClass};
use super::media_type::MediaType;
use super::storage::StorageObject;

/// Pixel dimensions of an image asset. Width and height are recorded
/// together or not at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// A persisted media asset: one original storage object plus zero or more
/// thumbnail derivatives that live and die with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: Uuid,
    /// None for global assets not owned by a tenant.
    pub tenant_id: Option<Uuid>,
    /// Assigned once at creation from the file extension; never mutated.
    pub media_type: MediaType,
    pub file_name: String,
    pub file_size: u64,
    pub mime_type: Option<String>,
    pub original: StorageObject,
    pub title: String,
    pub alt_text: Option<String>,
    pub description: Option<String>,
    /// Present only for image assets whose dimensions could be read.
    pub dimensions: Option<Dimensions>,
    /// Ordered smallest-first; at most one entry per size class, and only
    /// ever populated for image assets.
    pub derivatives: Vec<Derivative>,
    pub uploaded_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Patch for the user-editable display fields. Absent fields are left
/// untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataPatch {
    pub title: Option<String>,
    pub alt_text: Option<String>,
    pub description: Option<String>,
}

impl Asset {
    pub fn is_image(&self) -> bool {
        self.media_type == MediaType::Image
    }

    /// Storage object for the given size class, if that derivative exists.
    pub fn derivative(&self, size_class: SizeClass) -> Option<&StorageObject> {
        self.derivatives
            .iter()
            .find(|d| d.size_class == size_class)
            .map(|d| &d.object)
    }

    /// All storage keys referenced by this asset: the original plus every
    /// derivative actually present. The delete path walks exactly this set.
    pub fn storage_keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.original.key.as_str())
            .chain(self.derivatives.iter().map(|d| d.object.key.as_str()))
    }

    /// Apply a display-metadata patch and bump `updated_at`. Binary content,
    /// media type, dimensions, and derivatives are never touched here.
    pub fn apply_metadata_patch(&mut self, patch: MetadataPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(alt_text) = patch.alt_text {
            self.alt_text = Some(alt_text);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_asset() -> Asset {
        Asset {
            id: Uuid::new_v4(),
            tenant_id: None,
            media_type: MediaType::Image,
            file_name: "site.png".to_string(),
            file_size: 1024,
            mime_type: Some("image/png".to_string()),
            original: StorageObject {
                key: "media/abc/site.png".to_string(),
                url: "http://localhost:3000/media/abc/site.png".to_string(),
            },
            title: "site".to_string(),
            alt_text: None,
            description: None,
            dimensions: Some(Dimensions {
                width: 4000,
                height: 3000,
            }),
            derivatives: vec![Derivative {
                size_class: SizeClass::Small,
                object: StorageObject {
                    key: "media/abc/small_site.jpg".to_string(),
                    url: "http://localhost:3000/media/abc/small_site.jpg".to_string(),
                },
            }],
            uploaded_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_storage_keys_walks_original_and_derivatives() {
        let asset = test_asset();
        let keys: Vec<_> = asset.storage_keys().collect();
        assert_eq!(keys, vec!["media/abc/site.png", "media/abc/small_site.jpg"]);
    }

    #[test]
    fn test_derivative_lookup() {
        let asset = test_asset();
        assert!(asset.is_image());
        assert!(asset.derivative(SizeClass::Small).is_some());
        assert!(asset.derivative(SizeClass::Large).is_none());
    }

    #[test]
    fn test_metadata_patch_leaves_type_untouched() {
        let mut asset = test_asset();
        let before = asset.updated_at;
        asset.apply_metadata_patch(MetadataPatch {
            title: Some("Homepage banner".to_string()),
            alt_text: Some("Office exterior".to_string()),
            description: None,
        });
        assert_eq!(asset.title, "Homepage banner");
        assert_eq!(asset.alt_text.as_deref(), Some("Office exterior"));
        assert_eq!(asset.media_type, MediaType::Image);
        assert!(asset.updated_at >= before);
    }

    #[test]
    fn test_asset_serde_roundtrip() {
        let asset = test_asset();
        let json = serde_json::to_string(&asset).unwrap();
        let back: Asset = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, asset.id);
        assert_eq!(back.derivatives.len(), 1);
        assert_eq!(back.dimensions, asset.dimensions);
    }
}
