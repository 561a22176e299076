//! # Convex Polygons
//!
//! Output of the convex decomposition and input of the extrusion.

use glam::DVec2;
use shape_model::math::{orient2d, signed_area, Bounds2D};
use std::f64::consts::TAU;

/// A convex ring tagged with the materials of its source shape.
///
/// `edge_materials[i]` belongs to the edge from `points[i]` to
/// `points[(i + 1) % len]`. `None` marks an interior edge created by the
/// decomposition; such edges get no side wall.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexPolygon2D {
    pub points: Vec<DVec2>,
    pub front_material: u8,
    pub back_material: u8,
    pub edge_materials: Vec<Option<u8>>,
    bounds: Option<Bounds2D>,
}

impl ConvexPolygon2D {
    /// Creates a polygon. Missing edge materials are padded with `None`.
    pub fn new(
        points: Vec<DVec2>,
        front_material: u8,
        back_material: u8,
        mut edge_materials: Vec<Option<u8>>,
    ) -> Self {
        edge_materials.resize(points.len(), None);
        Self {
            points,
            front_material,
            back_material,
            edge_materials,
            bounds: None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points)
    }

    /// Computes and caches the bounds on first call; later calls return the
    /// cached value unchanged.
    pub fn calculate_bounds_2d(&mut self) -> Option<Bounds2D> {
        if self.bounds.is_none() {
            self.bounds = Bounds2D::from_points(self.points.iter().copied());
        }
        self.bounds
    }

    /// Cached bounds, `None` until [`Self::calculate_bounds_2d`] ran.
    #[inline]
    pub fn bounds(&self) -> Option<Bounds2D> {
        self.bounds
    }

    /// Edges as `(from, to, material)`.
    pub fn edges(&self) -> impl Iterator<Item = (DVec2, DVec2, Option<u8>)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| {
            (
                self.points[i],
                self.points[(i + 1) % n],
                self.edge_materials.get(i).copied().flatten(),
            )
        })
    }
}

/// Caches the bounds of every polygon and returns their union.
pub fn calculate_bounds_2d(polygons: &mut [ConvexPolygon2D]) -> Option<Bounds2D> {
    polygons
        .iter_mut()
        .filter_map(ConvexPolygon2D::calculate_bounds_2d)
        .reduce(|a, b| a.union(&b))
}

/// True when `ring` is a convex polygon that winds exactly once.
///
/// Collinear and repeated consecutive points are tolerated. Either
/// orientation is accepted.
pub fn is_convex(ring: &[DVec2]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut sign = 0.0_f64;
    let mut turning = 0.0;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        let c = ring[(i + 2) % n];
        let turn = orient2d(a, b, c);
        if turn != 0.0 {
            if sign == 0.0 {
                sign = turn.signum();
            } else if turn.signum() != sign {
                return false;
            }
        }
        let (ab, bc) = (b - a, c - b);
        if ab != DVec2::ZERO && bc != DVec2::ZERO {
            turning += ab.perp_dot(bc).atan2(ab.dot(bc));
        }
    }
    // Turning numbers are multiples of a full turn
    sign != 0.0 && (turning.abs() - TAU).abs() < 1e-3
}
