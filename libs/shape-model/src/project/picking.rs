//! # Picking
//!
//! Grid-space and screen-space hit tests over the project. Every query scans
//! shapes in draw order and keeps the first of equally good candidates.

use super::Project;
use crate::editor::GridProjection;
use crate::id::{SegmentId, SegmentKey, ShapeId};
use glam::DVec2;

/// The edge between a segment and its successor, as found by a line pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentLine {
    pub shape: ShapeId,
    /// Segment that owns the edge.
    pub segment1: SegmentId,
    /// Its successor.
    pub segment2: SegmentId,
    /// Grid distance from the query point to the expanded edge.
    pub distance: f64,
}

impl SegmentLine {
    /// Key of the segment owning the edge.
    pub fn key(&self) -> SegmentKey {
        SegmentKey::new(self.shape, self.segment1)
    }
}

impl Project {
    /// Finds the nearest expanded edge within `tolerance` of `point`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec2;
    /// use shape_model::{Project, Shape};
    ///
    /// let mut project = Project::new();
    /// project.add_shape(Shape::rectangle(DVec2::ZERO, DVec2::splat(4.0)));
    /// let near = DVec2::new(2.0, 0.5);
    /// assert!(project.find_segment_line_at_position(near, 1.0).is_some());
    /// assert!(project.find_segment_line_at_position(near, 0.1).is_none());
    /// ```
    pub fn find_segment_line_at_position(
        &self,
        point: DVec2,
        tolerance: f64,
    ) -> Option<SegmentLine> {
        let mut best: Option<SegmentLine> = None;
        for shape in &self.shapes {
            let Some((segment1, distance)) = shape.nearest_edge(point) else {
                continue;
            };
            if distance > tolerance || best.is_some_and(|b| distance >= b.distance) {
                continue;
            }
            let Some(next) = shape.next_of(segment1) else {
                continue;
            };
            best = Some(SegmentLine {
                shape: shape.id,
                segment1,
                segment2: next.id,
                distance,
            });
        }
        best
    }

    /// Finds the segment whose position lies nearest to `point` within `radius`.
    pub fn find_segment_at_position(&self, point: DVec2, radius: f64) -> Option<SegmentKey> {
        let mut best: Option<(SegmentKey, f64)> = None;
        for shape in &self.shapes {
            let Some((segment, distance)) = shape.nearest_segment(point) else {
                continue;
            };
            if distance <= radius && best.map_or(true, |(_, d)| distance < d) {
                best = Some((SegmentKey::new(shape.id, segment), distance));
            }
        }
        best.map(|(key, _)| key)
    }

    /// First shape in draw order whose outline contains `point`.
    pub fn find_shape_at_position(&self, point: DVec2) -> Option<ShapeId> {
        self.shapes
            .iter()
            .find(|shape| shape.contains_point(point) >= 0)
            .map(|shape| shape.id)
    }

    /// Screen-space variant of [`Project::find_segment_line_at_position`].
    pub fn find_segment_line_at_screen_position(
        &self,
        projection: &dyn GridProjection,
        screen_point: DVec2,
        screen_radius: f64,
    ) -> Option<SegmentLine> {
        self.find_segment_line_at_position(
            projection.screen_point_to_grid(screen_point),
            projection.screen_distance_to_grid(screen_radius),
        )
    }

    /// Screen-space variant of [`Project::find_segment_at_position`].
    pub fn find_segment_at_screen_position(
        &self,
        projection: &dyn GridProjection,
        screen_point: DVec2,
        screen_radius: f64,
    ) -> Option<SegmentKey> {
        self.find_segment_at_position(
            projection.screen_point_to_grid(screen_point),
            projection.screen_distance_to_grid(screen_radius),
        )
    }

    /// Screen-space variant of [`Project::find_shape_at_position`].
    pub fn find_shape_at_screen_position(
        &self,
        projection: &dyn GridProjection,
        screen_point: DVec2,
    ) -> Option<ShapeId> {
        self.find_shape_at_position(projection.screen_point_to_grid(screen_point))
    }

    // =========================================================================
    // SELECTION
    // =========================================================================

    /// Keys of every selected segment, in draw and ring order.
    pub fn selected_segments(&self) -> Vec<SegmentKey> {
        self.shapes
            .iter()
            .flat_map(|shape| {
                shape
                    .selected_segment_ids()
                    .into_iter()
                    .map(move |segment| SegmentKey::new(shape.id, segment))
            })
            .collect()
    }

    pub fn has_selection(&self) -> bool {
        self.shapes.iter().any(|s| s.has_selection())
    }

    pub fn select_all(&mut self) {
        for shape in &mut self.shapes {
            shape.select_all();
        }
    }

    pub fn clear_selection(&mut self) {
        for shape in &mut self.shapes {
            shape.clear_selection();
        }
    }
}
