//! # Convex Decomposition
//!
//! Splits every shape outline into convex polygons covering the same area.
//!
//! ## Pipeline
//!
//! ```text
//! Shape ─► Ring (expanded outline + edge materials)
//!       ─► nesting (shapes inside shapes at odd depth become holes)
//!       ─► hole bridging ─► ear clipping ─► Hertel–Mehlhorn merge
//! ```
//!
//! Already-convex outlines without holes skip triangulation and pass through
//! as a single polygon. Outer rings are emitted counter-clockwise (positive
//! signed area in grid coordinates).

mod holes;
mod merge;
mod triangulate;


use crate::polygon::{is_convex, ConvexPolygon2D};
use config::constants::AREA_EPSILON;
use glam::DVec2;
use log::{debug, trace, warn};
use shape_model::math::{orient2d, signed_area, winding_number};
use shape_model::Shape;

/// A closed outline with one material slot per edge.
///
/// `materials[i]` belongs to the edge from `points[i]` to the next point;
/// `None` marks edges that must not get a side wall.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Ring {
    pub points: Vec<DVec2>,
    pub materials: Vec<Option<u8>>,
}

impl Ring {
    /// Builds the expanded outline of a shape.
    ///
    /// Duplicate points and zero-width spikes are removed; `None` when fewer
    /// than three points remain or the enclosed area vanishes.
    pub fn from_shape(shape: &Shape) -> Option<Self> {
        let (points, materials): (Vec<DVec2>, Vec<Option<u8>>) = shape
            .outline_with_sources()
            .into_iter()
            .map(|(point, source)| (point, shape.segment(source).map(|s| s.material)))
            .unzip();
        let mut ring = Self { points, materials };
        ring.remove_spikes();
        (ring.points.len() >= 3 && ring.area().abs() >= AREA_EPSILON).then_some(ring)
    }

    /// Drops repeated points and vertices where the outline doubles back on
    /// itself, until neither is left.
    ///
    /// A repeated point hands its outgoing material to the survivor. A spike
    /// tip merges its two edges into one, which keeps the material of the
    /// longer edge since the merged edge lies on it.
    fn remove_spikes(&mut self) {
        loop {
            let n = self.points.len();
            if n < 3 {
                return;
            }
            if let Some(i) = (0..n).find(|&i| self.points[i] == self.points[(i + 1) % n]) {
                let next = (i + 1) % n;
                self.materials[i] = self.materials[next];
                self.points.remove(next);
                self.materials.remove(next);
                continue;
            }
            let spike = (0..n).find(|&i| {
                let a = self.points[(i + n - 1) % n];
                let b = self.points[i];
                let c = self.points[(i + 1) % n];
                orient2d(a, b, c) == 0.0 && (b - a).dot(c - b) < 0.0
            });
            let Some(i) = spike else {
                return;
            };
            let prev = (i + n - 1) % n;
            let (a, b, c) = (self.points[prev], self.points[i], self.points[(i + 1) % n]);
            if b.distance_squared(c) > a.distance_squared(b) {
                self.materials[prev] = self.materials[i];
            }
            trace!("removed outline spike at {b}");
            self.points.remove(i);
            self.materials.remove(i);
        }
    }

    pub fn area(&self) -> f64 {
        signed_area(&self.points)
    }

    /// Same ring traversed backwards, materials kept on their edges.
    pub fn reversed(&self) -> Self {
        let n = self.points.len();
        if n == 0 {
            return self.clone();
        }
        let points = self.points.iter().rev().copied().collect();
        let materials = (0..n).map(|j| self.materials[(2 * n - 2 - j) % n]).collect();
        Self { points, materials }
    }

    /// This ring with positive (`ccw`) or negative signed area.
    pub fn oriented(self, ccw: bool) -> Self {
        if (self.area() > 0.0) == ccw {
            self
        } else {
            self.reversed()
        }
    }

    /// True when every point of `self` lies inside `outer`.
    fn is_inside(&self, outer: &Ring) -> bool {
        self.points
            .iter()
            .all(|p| winding_number(*p, &outer.points) != 0)
    }
}

/// Decomposes all shapes into convex polygons, in shape order.
///
/// A shape lying entirely inside another shape at odd nesting depth is cut
/// out of its immediate container as a hole; at even depth it is a solid
/// island. Shapes with fewer than three distinct points or no area are
/// skipped.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use shape_mesh::decompose_shapes;
/// use shape_model::Shape;
///
/// let square = Shape::rectangle(DVec2::ZERO, DVec2::splat(2.0));
/// let polygons = decompose_shapes(&[square]);
/// assert_eq!(polygons.len(), 1);
/// assert_eq!(polygons[0].len(), 4);
/// ```
pub fn decompose_shapes(shapes: &[Shape]) -> Vec<ConvexPolygon2D> {
    let rings: Vec<(usize, Ring)> = shapes
        .iter()
        .enumerate()
        .filter_map(|(index, shape)| match Ring::from_shape(shape) {
            Some(ring) => Some((index, ring)),
            None => {
                debug!("{}: degenerate outline skipped", shape.id());
                None
            }
        })
        .collect();

    let areas: Vec<f64> = rings.iter().map(|(_, r)| r.area().abs()).collect();
    let parents: Vec<Option<usize>> = (0..rings.len())
        .map(|i| {
            (0..rings.len())
                .filter(|&j| j != i && areas[j] > areas[i] && rings[i].1.is_inside(&rings[j].1))
                .min_by(|&a, &b| areas[a].total_cmp(&areas[b]))
        })
        .collect();
    let depths: Vec<usize> = (0..rings.len())
        .map(|i| {
            let mut depth = 0;
            let mut current = parents[i];
            while let Some(parent) = current {
                depth += 1;
                current = parents[parent];
            }
            depth
        })
        .collect();

    let mut polygons = Vec::new();
    for (i, (shape_index, ring)) in rings.iter().enumerate() {
        if depths[i] % 2 == 1 {
            continue;
        }
        let shape = &shapes[*shape_index];
        let holes: Vec<Ring> = (0..rings.len())
            .filter(|&k| parents[k] == Some(i))
            .map(|k| rings[k].1.clone().oriented(false))
            .collect();
        let before = polygons.len();
        polygons.extend(decompose_ring(
            ring.clone().oriented(true),
            holes,
            shape.front_material,
            shape.back_material,
        ));
        trace!(
            "{}: {} convex polygon(s)",
            shape.id(),
            polygons.len() - before
        );
    }
    polygons
}

/// Decomposes one counter-clockwise outer ring with clockwise holes.
pub(crate) fn decompose_ring(
    outer: Ring,
    holes: Vec<Ring>,
    front_material: u8,
    back_material: u8,
) -> Vec<ConvexPolygon2D> {
    if holes.is_empty() && is_convex(&outer.points) {
        return vec![ConvexPolygon2D::new(
            outer.points,
            front_material,
            back_material,
            outer.materials,
        )];
    }

    let ring = holes::bridge_holes(outer, holes);
    let triangles = triangulate::ear_clip(&ring.points);
    if triangles.is_empty() {
        warn!("Triangulation produced no triangles for {} points", ring.points.len());
        return Vec::new();
    }
    let pieces = merge::merge_triangles(&ring.points, &triangles);
    merge::into_polygons(&ring, &pieces, front_material, back_material)
}
