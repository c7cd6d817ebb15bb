//! Domain models for the media asset pipeline.

pub mod asset;
pub mod derivative;
pub mod media_type;
pub mod storage;

pub use asset::{Asset, Dimensions, MetadataPatch};
pub use derivative::{Derivative, SizeClass};
pub use media_type::{classify_extension, extension_of, guess_mime, MediaType};
pub use storage::{StorageBackend, StorageObject};
