//! Types flowing through the upload pipeline.

use std::fmt::{Display, Formatter, Result as FmtResult};

use bytes::Bytes;
use serde::Serialize;
use uuid::Uuid;

use folio_core::models::{Asset, SizeClass};

/// A candidate upload: the declared filename plus the full payload.
#[derive(Clone, Debug)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Bytes,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Caller-supplied fields for `create`. Everything is optional; the tenant
/// and uploader ids are stored opaquely and never interpreted.
#[derive(Clone, Debug, Default)]
pub struct CreateOptions {
    pub title: Option<String>,
    pub alt_text: Option<String>,
    pub description: Option<String>,
    pub tenant_id: Option<Uuid>,
    pub uploaded_by: Option<Uuid>,
}

/// Non-fatal degradation that happened while creating an asset. Each of
/// these is also logged where it is absorbed; surfacing them here lets
/// callers report partial results without changing any invariant.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PipelineWarning {
    /// The image could not be decoded far enough to read its dimensions.
    DimensionsUnavailable,
    /// One size class of the ladder could not be generated.
    ThumbnailFailed { size_class: SizeClass, reason: String },
    /// A generated thumbnail could not be written to storage.
    ThumbnailWriteFailed { size_class: SizeClass, reason: String },
}

impl Display for PipelineWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PipelineWarning::DimensionsUnavailable => {
                write!(f, "image dimensions could not be determined")
            }
            PipelineWarning::ThumbnailFailed { size_class, reason } => {
                write!(f, "{} thumbnail generation failed: {}", size_class, reason)
            }
            PipelineWarning::ThumbnailWriteFailed { size_class, reason } => {
                write!(f, "{} thumbnail write failed: {}", size_class, reason)
            }
        }
    }
}

/// Result of a successful `create`: the persisted asset plus any warnings
/// about absorbed failures (missing dimensions, absent derivatives).
#[derive(Debug, Clone)]
pub struct CreatedAsset {
    pub asset: Asset,
    pub warnings: Vec<PipelineWarning>,
}

/// Result of `delete`. Deletion is idempotent: a missing record or missing
/// storage objects still count as success. `unreclaimed` lists keys whose
/// deletion failed with an unexpected storage error; the record is removed
/// regardless.
#[derive(Debug, Clone)]
pub struct DeleteReport {
    pub asset_id: Uuid,
    pub already_absent: bool,
    pub unreclaimed: Vec<String>,
}

impl DeleteReport {
    /// True when every storage object was reclaimed (or was already gone).
    pub fn is_clean(&self) -> bool {
        self.unreclaimed.is_empty()
    }
}
