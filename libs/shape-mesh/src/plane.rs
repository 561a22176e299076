//! # Triangle Plane
//!
//! Supporting plane of one mesh triangle. Gives hit normals to the raycast
//! and sorts triangles into side walls and caps for the lookup table.

use crate::lookup::TriangleFacing;
use glam::DVec3;

/// Below this cross-product length a triangle has no usable normal.
const DEGENERATE_CROSS: f64 = 1e-10;

/// Distance under which a point counts as lying on the plane.
const ON_PLANE: f64 = 1e-5;

/// Unit normal and offset of a non-degenerate triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrianglePlane {
    normal: DVec3,
    offset: f64,
}

impl TrianglePlane {
    /// The normal follows the winding: seen from where it points, the
    /// corners run counter-clockwise. `None` for a degenerate triangle.
    pub fn from_triangle([a, b, c]: [DVec3; 3]) -> Option<Self> {
        let cross = (b - a).cross(c - a);
        if !cross.is_finite() || cross.length() < DEGENERATE_CROSS {
            return None;
        }
        let normal = cross.normalize();
        Some(Self {
            normal,
            offset: normal.dot(a),
        })
    }

    #[inline]
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Signed distance, positive on the side the normal points to.
    pub fn distance_to(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.offset
    }

    /// True when `point` sits clearly on the normal's side.
    pub fn faces(&self, point: DVec3) -> bool {
        self.distance_to(point) > ON_PLANE
    }

    /// Side wall when the normal is horizontal within `side_wall_epsilon`,
    /// otherwise the cap the normal points out of.
    pub fn facing(&self, side_wall_epsilon: f64) -> TriangleFacing {
        if self.normal.z.abs() < side_wall_epsilon {
            TriangleFacing::SideWall
        } else if self.normal.z < 0.0 {
            TriangleFacing::Front
        } else {
            TriangleFacing::Back
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::constants::SIDE_WALL_NORMAL_EPSILON;

    #[test]
    fn test_normal_follows_winding() {
        let plane = TrianglePlane::from_triangle([DVec3::ZERO, DVec3::X, DVec3::Y]).unwrap();
        assert_eq!(plane.normal(), DVec3::Z);
        let flipped = TrianglePlane::from_triangle([DVec3::ZERO, DVec3::Y, DVec3::X]).unwrap();
        assert_eq!(flipped.normal(), -DVec3::Z);
    }

    #[test]
    fn test_degenerate_triangle_has_no_plane() {
        assert!(TrianglePlane::from_triangle([DVec3::ZERO, DVec3::X, DVec3::X * 3.0]).is_none());
        assert!(TrianglePlane::from_triangle([DVec3::ZERO, DVec3::ZERO, DVec3::Y]).is_none());
    }

    #[test]
    fn test_faces_and_distance() {
        let cap = [DVec3::new(0.0, 0.0, 0.5), DVec3::new(1.0, 0.0, 0.5), DVec3::new(0.0, 1.0, 0.5)];
        let plane = TrianglePlane::from_triangle(cap).unwrap();
        assert_eq!(plane.distance_to(DVec3::new(4.0, 4.0, 1.5)), 1.0);
        assert!(plane.faces(DVec3::new(0.0, 0.0, 1.0)));
        assert!(!plane.faces(DVec3::ZERO));
        assert!(!plane.faces(DVec3::new(3.0, 1.0, 0.5)));
    }

    #[test]
    fn test_facing() {
        let wall = [DVec3::ZERO, DVec3::X, DVec3::new(1.0, 0.0, 0.5)];
        let back = [DVec3::ZERO, DVec3::X, DVec3::Y];
        let front = [DVec3::ZERO, DVec3::Y, DVec3::X];
        let facing = |t| {
            TrianglePlane::from_triangle(t)
                .unwrap()
                .facing(SIDE_WALL_NORMAL_EPSILON)
        };
        assert_eq!(facing(wall), TriangleFacing::SideWall);
        assert_eq!(facing(back), TriangleFacing::Back);
        assert_eq!(facing(front), TriangleFacing::Front);
    }
}
