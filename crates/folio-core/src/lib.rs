//! Folio Core Library
//!
//! This crate provides the domain models, media classification table, and
//! policy configuration shared across all Folio components.

pub mod config;
pub mod models;

// Re-export commonly used types
pub use config::{StorageSettings, UploadPolicy};
pub use models::{
    classify_extension, guess_mime, Asset, Derivative, Dimensions, MediaType, MetadataPatch,
    SizeClass, StorageBackend, StorageObject,
};
