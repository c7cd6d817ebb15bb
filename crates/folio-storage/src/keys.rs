//! Shared key generation for storage backends.
//!
//! Key format: originals live at `media/{asset_id}/{filename}`, derivatives
//! at `media/{asset_id}/{size}_{stem}.jpg`. Derivatives always carry the
//! `.jpg` extension because the ladder re-encodes to JPEG regardless of the
//! source format.

use std::path::Path;

use folio_core::models::SizeClass;
use uuid::Uuid;

/// Sanitize a user-supplied filename for use inside a storage key.
///
/// Keeps alphanumerics plus `.`/`-`/`_`, strips any directory components,
/// and caps the length. Anything degenerate collapses to a fixed name.
pub fn sanitize_filename(filename: &str) -> String {
    const MAX: usize = 255;
    let base = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);
    if base.contains("..") {
        return "file".to_string();
    }
    let s: String = base
        .chars()
        .take(MAX)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if s.trim_matches(['_', '.']).is_empty() {
        "file".to_string()
    } else {
        s
    }
}

/// Key for an asset's original object.
pub fn original_key(asset_id: Uuid, filename: &str) -> String {
    format!("media/{}/{}", asset_id, sanitize_filename(filename))
}

/// Key for one of an asset's thumbnail derivatives.
pub fn derivative_key(asset_id: Uuid, size_class: SizeClass, filename: &str) -> String {
    let safe = sanitize_filename(filename);
    let stem = Path::new(&safe)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("file");
    format!("media/{}/{}_{}.jpg", asset_id, size_class, stem)
}
