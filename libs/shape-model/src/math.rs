//! # 2D Geometry Helpers
//!
//! Planar predicates shared by the model queries and the mesh pipeline.
//! Orientation uses the adaptive-precision predicate from `robust`, so
//! winding and convexity decisions are exact for finite input.

use config::constants::approx_zero;
use glam::DVec2;
use robust::Coord;
use serde::{Deserialize, Serialize};

// =============================================================================
// PREDICATES
// =============================================================================

/// Orientation of `c` relative to the directed line `a -> b`.
///
/// Positive when `a, b, c` turn counter-clockwise (in a y-up frame),
/// negative when clockwise, exactly zero when collinear.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use shape_model::math::orient2d;
///
/// let ccw = orient2d(DVec2::ZERO, DVec2::X, DVec2::Y);
/// assert!(ccw > 0.0);
/// assert_eq!(orient2d(DVec2::ZERO, DVec2::X, DVec2::new(2.0, 0.0)), 0.0);
/// ```
#[inline]
pub fn orient2d(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    robust::orient2d(
        Coord { x: a.x, y: a.y },
        Coord { x: b.x, y: b.y },
        Coord { x: c.x, y: c.y },
    )
}

/// Signed area of a closed ring (shoelace). Positive for counter-clockwise.
pub fn signed_area(ring: &[DVec2]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        twice += a.perp_dot(b);
    }
    twice * 0.5
}

/// Non-zero winding number of `ring` around `point`.
///
/// Points exactly on the boundary count as inside the edge's upward or
/// downward crossing, whichever the half-open rule picks.
pub fn winding_number(point: DVec2, ring: &[DVec2]) -> i32 {
    let n = ring.len();
    let mut winding = 0;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        if a.y <= point.y {
            if b.y > point.y && orient2d(a, b, point) > 0.0 {
                winding += 1;
            }
        } else if b.y <= point.y && orient2d(a, b, point) < 0.0 {
            winding -= 1;
        }
    }
    winding
}

/// Shortest distance from `point` to the closed line segment `a..b`.
pub fn distance_to_line_segment(point: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if approx_zero(len_sq) {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

/// True when `point` lies within `epsilon` of the line segment `a..b`.
#[inline]
pub fn is_point_on_line(point: DVec2, a: DVec2, b: DVec2, epsilon: f64) -> bool {
    distance_to_line_segment(point, a, b) <= epsilon
}

/// True when two line segments are collinear and one contains the other.
///
/// Either both endpoints of `a..b` lie on `p..q`, or both endpoints of
/// `p..q` lie on `a..b`.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use shape_model::math::lines_overlap;
///
/// let a = DVec2::new(0.0, 0.0);
/// let b = DVec2::new(4.0, 0.0);
/// assert!(lines_overlap(a, b, DVec2::new(1.0, 0.0), DVec2::new(2.0, 0.0), 1e-4));
/// assert!(!lines_overlap(a, b, DVec2::new(1.0, 1.0), DVec2::new(2.0, 1.0), 1e-4));
/// ```
pub fn lines_overlap(a: DVec2, b: DVec2, p: DVec2, q: DVec2, epsilon: f64) -> bool {
    (is_point_on_line(a, p, q, epsilon) && is_point_on_line(b, p, q, epsilon))
        || (is_point_on_line(p, a, b, epsilon) && is_point_on_line(q, a, b, epsilon))
}

// =============================================================================
// BOUNDS
// =============================================================================

/// Axis-aligned 2D bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds2D {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds2D {
    /// Computes the bounds of a point set, `None` when empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = DVec2>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self {
            min: first,
            max: first,
        };
        for point in iter {
            bounds.min = bounds.min.min(point);
            bounds.max = bounds.max.max(point);
        }
        Some(bounds)
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// True when `point` is inside or on the boundary.
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
