//! # Validation
//!
//! Repairs malformed topology before a mesh rebuild. Every problem is either
//! fixed in place or pruned; nothing here fails.

use super::Project;
use crate::generator::SegmentGenerator;
use crate::id::{SegmentId, ShapeId};
use log::warn;
use std::collections::HashSet;

/// Counts of the repairs made by [`Project::validate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Segments dropped for non-finite positions.
    pub removed_segments: usize,
    /// `next` links rewritten to match ring order.
    pub repaired_links: usize,
    /// Generators with out-of-range parameters reset to Linear.
    pub reset_generators: usize,
    /// Duplicate shape or segment ids replaced by fresh ones.
    pub reassigned_ids: usize,
    /// Shapes removed because they had no segments left.
    pub pruned_shapes: usize,
}

impl ValidationReport {
    /// True when validation changed nothing.
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

impl Project {
    /// Repairs or prunes malformed shapes.
    ///
    /// - Segments with non-finite positions are dropped
    /// - Duplicate ids are replaced with fresh ones
    /// - Generators with invalid parameters fall back to Linear
    /// - Every `next` link is rewritten to the ring order
    /// - Shapes left without segments are removed
    ///
    /// Called before every mesh rebuild. Each repair is logged at warn level.
    pub fn validate(&mut self) -> ValidationReport {
        let mut report = ValidationReport::default();

        let max_shape_id = self.shapes.iter().map(|s| s.id.0 + 1).max().unwrap_or(0);
        self.next_shape_id = self.next_shape_id.max(max_shape_id);
        let mut shape_ids = HashSet::new();
        for index in 0..self.shapes.len() {
            let id = self.shapes[index].id;
            if !shape_ids.insert(id) {
                let fresh = ShapeId(self.next_shape_id);
                self.next_shape_id += 1;
                warn!("Duplicate {id} renamed to {fresh}");
                self.shapes[index].id = fresh;
                shape_ids.insert(fresh);
                report.reassigned_ids += 1;
            }
        }

        for shape in &mut self.shapes {
            let shape_id = shape.id;

            let before = shape.segments.len();
            shape.segments.retain(|s| s.position.is_finite());
            let removed = before - shape.segments.len();
            if removed > 0 {
                warn!("{shape_id}: dropped {removed} segment(s) with non-finite positions");
                report.removed_segments += removed;
            }

            let max_segment_id = shape.segments.iter().map(|s| s.id.0 + 1).max().unwrap_or(0);
            shape.next_segment_id = shape.next_segment_id.max(max_segment_id);
            let mut segment_ids = HashSet::new();
            for segment in &mut shape.segments {
                if !segment_ids.insert(segment.id) {
                    let fresh = SegmentId(shape.next_segment_id);
                    shape.next_segment_id += 1;
                    warn!("{shape_id}: duplicate {} renamed to {fresh}", segment.id);
                    segment.id = fresh;
                    segment_ids.insert(fresh);
                    report.reassigned_ids += 1;
                }
                if !segment.generator.is_valid() {
                    warn!(
                        "{shape_id}: {} generator {} has invalid parameters, reset to Linear",
                        segment.id,
                        segment.generator.kind()
                    );
                    segment.generator = SegmentGenerator::Linear;
                    report.reset_generators += 1;
                }
            }

            let repaired = shape.relink();
            if repaired > 0 {
                warn!("{shape_id}: repaired {repaired} ring link(s)");
                report.repaired_links += repaired;
            }
        }

        let before = self.shapes.len();
        self.shapes.retain(|shape| {
            if shape.segments.is_empty() {
                warn!("{}: pruned, no segments", shape.id);
                false
            } else {
                true
            }
        });
        report.pruned_shapes = before - self.shapes.len();

        report
    }
}
