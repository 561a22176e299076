//! # Segment
//!
//! One vertex of a shape's outline. The segment owns the edge from its
//! position to its successor's position: the side wall material and the
//! generator that shapes that edge.

use crate::generator::{GeneratorKind, SegmentGenerator};
use crate::id::SegmentId;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A vertex of a shape ring together with the edge it starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub(crate) id: SegmentId,
    /// Grid position.
    pub position: DVec2,
    pub selected: bool,
    /// Material index of the side wall from this segment to its successor.
    pub material: u8,
    pub generator: SegmentGenerator,
    pub(crate) next: Option<SegmentId>,
}

impl Segment {
    /// A default-state segment: unselected, material 0, Linear generator.
    pub(crate) fn new(id: SegmentId, position: DVec2) -> Self {
        Self {
            id,
            position,
            selected: false,
            material: 0,
            generator: SegmentGenerator::Linear,
            next: None,
        }
    }

    #[inline]
    pub fn id(&self) -> SegmentId {
        self.id
    }

    /// Id of the successor in the ring.
    #[inline]
    pub fn next(&self) -> Option<SegmentId> {
        self.next
    }

    #[inline]
    pub fn generator_kind(&self) -> GeneratorKind {
        self.generator.kind()
    }
}
