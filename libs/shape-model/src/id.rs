//! # Identifiers
//!
//! Stable ids for shapes and segments. A [`ShapeId`] is unique within a
//! project, a [`SegmentId`] is unique within its shape. Ids are never reused
//! while the owner lives, so they stay valid across edits of other elements.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Project-unique shape identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
pub struct ShapeId(pub u32);

/// Shape-unique segment identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
pub struct SegmentId(pub u32);

/// Addresses a segment anywhere in a project.
///
/// # Example
///
/// ```rust
/// use shape_model::{SegmentId, SegmentKey, ShapeId};
///
/// let key = SegmentKey::new(ShapeId(1), SegmentId(4));
/// assert_eq!(key.to_string(), "shape#1/segment#4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
pub struct SegmentKey {
    pub shape: ShapeId,
    pub segment: SegmentId,
}

impl SegmentKey {
    pub fn new(shape: ShapeId, segment: SegmentId) -> Self {
        Self { shape, segment }
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape#{}", self.0)
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "segment#{}", self.0)
    }
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.shape, self.segment)
    }
}
