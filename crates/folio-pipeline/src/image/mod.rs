//! Image processing for the asset pipeline
//!
//! This module provides:
//! - Best-effort dimension extraction (probe)
//! - The fixed thumbnail derivative ladder (thumbnail)

pub mod probe;
pub mod thumbnail;

pub use probe::probe_dimensions;
pub use thumbnail::{generate_ladder, GeneratedThumbnail, LadderOutcome, ThumbnailError};
