//! Folio Storage Library
//!
//! Storage abstraction and backends for the media pipeline. The pipeline
//! addresses objects by opaque keys; this crate owns the key layout and the
//! backends that honor it.
//!
//! # Storage key format
//!
//! All backends use the same asset-scoped layout:
//!
//! - **Original**: `media/{asset_id}/{filename}`
//! - **Derivative**: `media/{asset_id}/{size}_{stem}.jpg`
//!
//! Keys must not contain `..` or a leading `/`. Key generation is centralized
//! in the `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
pub mod local;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use folio_core::models::StorageBackend;
pub use local::LocalStorage;
pub use memory::MemoryStorage;
pub use traits::{DeleteStatus, Storage, StorageError, StorageResult};
