use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::storage::StorageObject;

/// Thumbnail size class with a fixed maximum bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    /// All size classes, smallest first. Every image upload attempts the
    /// whole ladder.
    pub const ALL: [SizeClass; 3] = [SizeClass::Small, SizeClass::Medium, SizeClass::Large];

    /// Maximum bounding box (width, height) for this size class.
    pub fn bounding_box(self) -> (u32, u32) {
        match self {
            SizeClass::Small => (150, 150),
            SizeClass::Medium => (300, 300),
            SizeClass::Large => (600, 600),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SizeClass::Small => "small",
            SizeClass::Medium => "medium",
            SizeClass::Large => "large",
        }
    }
}

impl Display for SizeClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeClass {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "small" => Ok(SizeClass::Small),
            "medium" => Ok(SizeClass::Medium),
            "large" => Ok(SizeClass::Large),
            _ => Err(anyhow::anyhow!("Invalid size class: {}", s)),
        }
    }
}

/// A stored thumbnail derivative of an image asset's original.
///
/// At most one derivative per size class exists on an asset; the set is kept
/// ordered smallest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Derivative {
    pub size_class: SizeClass,
    pub object: StorageObject,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_order_and_boxes() {
        let boxes: Vec<_> = SizeClass::ALL.iter().map(|s| s.bounding_box()).collect();
        assert_eq!(boxes, vec![(150, 150), (300, 300), (600, 600)]);
    }

    #[test]
    fn test_size_class_roundtrip() {
        for s in SizeClass::ALL {
            assert_eq!(s.as_str().parse::<SizeClass>().unwrap(), s);
        }
        assert!("tiny".parse::<SizeClass>().is_err());
    }
}
