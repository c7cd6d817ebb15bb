use folio_core::config::UploadPolicy;
use folio_core::models::{classify_extension, extension_of, MediaType};

use crate::types::Upload;

/// A single upload policy violation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("File size too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Image size too large: {size} bytes (max: {max} bytes)")]
    ImageTooLarge { size: u64, max: u64 },

    #[error("Unsupported file type: {extension}")]
    UnsupportedType { extension: String },

    #[error("Empty file")]
    EmptyFile,
}

/// Upload validator.
///
/// Evaluates every rule and collects all violations instead of stopping at
/// the first, so a caller sees everything wrong with an upload at once. A
/// successful validation yields the resolved media type; downstream stages
/// never re-derive it.
pub struct UploadValidator {
    policy: UploadPolicy,
}

impl UploadValidator {
    pub fn new(policy: UploadPolicy) -> Self {
        Self { policy }
    }

    pub fn validate(&self, upload: &Upload) -> Result<MediaType, Vec<ValidationError>> {
        let mut violations = Vec::new();
        let size = upload.size();

        if size == 0 {
            violations.push(ValidationError::EmptyFile);
        }
        if size > self.policy.max_file_size {
            violations.push(ValidationError::FileTooLarge {
                size,
                max: self.policy.max_file_size,
            });
        }

        let media_type = classify_extension(&upload.file_name);
        match media_type {
            None => violations.push(ValidationError::UnsupportedType {
                extension: extension_of(&upload.file_name)
                    .map(|e| format!(".{e}"))
                    .unwrap_or_else(|| "(none)".to_string()),
            }),
            Some(MediaType::Image) => {
                // Images get the stricter limit on top of the general one.
                if size > self.policy.max_image_size {
                    violations.push(ValidationError::ImageTooLarge {
                        size,
                        max: self.policy.max_image_size,
                    });
                }
            }
            Some(_) => {}
        }

        match (media_type, violations.is_empty()) {
            (Some(media_type), true) => Ok(media_type),
            _ => Err(violations),
        }
    }
}
