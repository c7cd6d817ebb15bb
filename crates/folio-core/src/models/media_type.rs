use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Coarse media classification, assigned once at upload from the file
/// extension and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Document,
    Video,
    Audio,
}

/// Extension allow-lists, one per media type. The lists must stay pairwise
/// disjoint: `classify_extension` returns the first matching list, so an
/// overlap would make classification order-dependent.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt", "rtf"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "wmv", "webm"];
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "m4a"];

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Document => "document",
            MediaType::Video => "video",
            MediaType::Audio => "audio",
        }
    }

    /// The extension allow-list for this media type.
    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            MediaType::Image => IMAGE_EXTENSIONS,
            MediaType::Document => DOCUMENT_EXTENSIONS,
            MediaType::Video => VIDEO_EXTENSIONS,
            MediaType::Audio => AUDIO_EXTENSIONS,
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image" => Ok(MediaType::Image),
            "document" => Ok(MediaType::Document),
            "video" => Ok(MediaType::Video),
            "audio" => Ok(MediaType::Audio),
            _ => Err(anyhow::anyhow!("Invalid media type: {}", s)),
        }
    }
}

/// Lowercased extension of a filename, without the dot.
pub fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Classify a filename into a media type from its extension.
///
/// This is the single source of truth for extension→type mapping: the upload
/// validator and the lifecycle's type assignment both go through it. An
/// extension outside all four allow-lists yields `None` — callers reject the
/// upload rather than defaulting to a type.
pub fn classify_extension(file_name: &str) -> Option<MediaType> {
    let ext = extension_of(file_name)?;
    let ext = ext.as_str();
    if IMAGE_EXTENSIONS.contains(&ext) {
        Some(MediaType::Image)
    } else if DOCUMENT_EXTENSIONS.contains(&ext) {
        Some(MediaType::Document)
    } else if VIDEO_EXTENSIONS.contains(&ext) {
        Some(MediaType::Video)
    } else if AUDIO_EXTENSIONS.contains(&ext) {
        Some(MediaType::Audio)
    } else {
        None
    }
}

/// Guess the MIME type of a filename from its extension.
pub fn guess_mime(file_name: &str) -> Option<&'static str> {
    let ext = extension_of(file_name)?;
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        "rtf" => "application/rtf",
        "mp4" => "video/mp4",
        "avi" => "video/x-msvideo",
        "mov" => "video/quicktime",
        "wmv" => "video/x-ms-wmv",
        "webm" => "video/webm",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "m4a" => "audio/mp4",
        _ => return None,
    };
    Some(mime)
}
