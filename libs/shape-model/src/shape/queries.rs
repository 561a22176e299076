//! # Shape Queries
//!
//! Containment, selection and proximity queries over a shape's fully
//! expanded outline.

use super::Shape;
use crate::generator::SegmentGenerator;
use crate::id::SegmentId;
use crate::math::{distance_to_line_segment, signed_area, winding_number, Bounds2D};
use glam::DVec2;

impl Shape {
    /// Tests a grid point against the expanded outline.
    ///
    /// Returns `-1` when the point is outside. Inside, returns the non-zero
    /// winding magnitude minus one: `0` for any simple outline, higher when
    /// a self-overlapping outline wraps the point several times.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec2;
    /// use shape_model::Shape;
    ///
    /// let square = Shape::rectangle(DVec2::ZERO, DVec2::splat(4.0));
    /// assert_eq!(square.contains_point(DVec2::splat(2.0)), 0);
    /// assert_eq!(square.contains_point(DVec2::splat(5.0)), -1);
    /// ```
    pub fn contains_point(&self, point: DVec2) -> i32 {
        let outline = self.outline();
        if outline.len() < 3 {
            return -1;
        }
        winding_number(point, &outline).abs() - 1
    }

    /// Signed area of the expanded outline, positive for counter-clockwise
    /// in a y-up frame.
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.outline())
    }

    /// Bounds of the expanded outline, `None` for an empty shape.
    pub fn bounds(&self) -> Option<Bounds2D> {
        Bounds2D::from_points(self.outline())
    }

    /// True when the shape has segments and all of them are selected.
    pub fn is_selected(&self) -> bool {
        !self.segments.is_empty() && self.segments.iter().all(|s| s.selected)
    }

    /// True when at least one segment is selected.
    pub fn has_selection(&self) -> bool {
        self.segments.iter().any(|s| s.selected)
    }

    pub fn select_all(&mut self) {
        for segment in &mut self.segments {
            segment.selected = true;
        }
    }

    pub fn clear_selection(&mut self) {
        for segment in &mut self.segments {
            segment.selected = false;
        }
    }

    /// Ids of the selected segments in ring order.
    pub fn selected_segment_ids(&self) -> Vec<SegmentId> {
        self.segments
            .iter()
            .filter(|s| s.selected)
            .map(|s| s.id)
            .collect()
    }

    /// Segment whose expanded edge passes closest to `point`, with the distance.
    ///
    /// Ties keep the earliest segment in ring order.
    pub fn nearest_edge(&self, point: DVec2) -> Option<(SegmentId, f64)> {
        let mut best: Option<(SegmentId, f64)> = None;
        for segment in &self.segments {
            let Some(lines) = self.edge_lines(segment.id) else {
                continue;
            };
            for (a, b) in lines {
                let distance = distance_to_line_segment(point, a, b);
                if best.map_or(true, |(_, d)| distance < d) {
                    best = Some((segment.id, distance));
                }
            }
        }
        best
    }

    /// Segment whose position is closest to `point`, with the distance.
    pub fn nearest_segment(&self, point: DVec2) -> Option<(SegmentId, f64)> {
        let mut best: Option<(SegmentId, f64)> = None;
        for segment in &self.segments {
            let distance = segment.position.distance(point);
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((segment.id, distance));
            }
        }
        best
    }

    /// Moves every segment and bezier pivot by `offset`.
    pub fn translate(&mut self, offset: DVec2) {
        for segment in &mut self.segments {
            segment.position += offset;
            if let SegmentGenerator::Bezier(bezier) = &mut segment.generator {
                bezier.pivot1 += offset;
                bezier.pivot2 += offset;
            }
        }
    }
}
