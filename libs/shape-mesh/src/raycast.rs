//! # Mesh Raycast
//!
//! Ray queries against a snapshot of a mesh, used by the material tools to
//! find the triangle under the pointer.

use crate::mesh::Mesh;
use crate::plane::TrianglePlane;
use config::constants::RAY_EPSILON;
use glam::DVec3;

/// Closest intersection of a ray with the mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub point: DVec3,
    /// Unit normal of the hit triangle's plane, following its winding.
    pub normal: DVec3,
    /// Distance from the ray origin along the normalized direction.
    pub distance: f64,
    pub vertices: [DVec3; 3],
    /// Position of the triangle in the mesh triangle list.
    pub triangle_index: usize,
    /// True when the ray struck the side the normal faces.
    pub front_facing: bool,
}

/// Immutable ray-query structure over one mesh snapshot.
///
/// Rebuilt together with the mesh; it does not observe later mesh edits.
#[derive(Debug, Clone, Default)]
pub struct MeshRaycast {
    vertices: Vec<DVec3>,
    triangles: Vec<[u32; 3]>,
    bounds: Option<(DVec3, DVec3)>,
}

impl MeshRaycast {
    pub fn new(mesh: &Mesh) -> Self {
        Self {
            vertices: mesh.vertices().to_vec(),
            triangles: mesh.triangles().to_vec(),
            bounds: mesh.bounding_box(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Finds the closest triangle hit in front of `origin`.
    ///
    /// Both triangle sides count. On an exact distance tie the triangle
    /// that comes first in the mesh wins. A zero or non-finite direction
    /// hits nothing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::{DVec2, DVec3};
    /// use shape_mesh::{create_extruded_polygon_mesh, ConvexPolygon2D, MeshRaycast};
    ///
    /// let square = ConvexPolygon2D::new(
    ///     vec![DVec2::ZERO, DVec2::X, DVec2::ONE, DVec2::Y],
    ///     0,
    ///     0,
    ///     vec![Some(0); 4],
    /// );
    /// let mesh = create_extruded_polygon_mesh(&[square], 1.0).unwrap();
    /// let raycast = MeshRaycast::new(&mesh);
    ///
    /// let hit = raycast
    ///     .raycast(DVec3::new(0.5, -0.5, -5.0), DVec3::Z)
    ///     .unwrap();
    /// assert_eq!(hit.distance, 5.0);
    /// assert_eq!(hit.normal, -DVec3::Z);
    /// ```
    pub fn raycast(&self, origin: DVec3, direction: DVec3) -> Option<RaycastHit> {
        let direction = direction.try_normalize()?;
        if !origin.is_finite() {
            return None;
        }
        let (min, max) = self.bounds?;
        if !ray_hits_box(origin, direction, min, max) {
            return None;
        }

        let mut best: Option<(usize, f64)> = None;
        for (index, tri) in self.triangles.iter().enumerate() {
            let [v0, v1, v2] = self.corners(tri)?;
            if let Some(t) = ray_triangle_intersect(origin, direction, v0, v1, v2) {
                if best.map_or(true, |(_, d)| t < d) {
                    best = Some((index, t));
                }
            }
        }

        let (triangle_index, distance) = best?;
        let vertices = self.corners(&self.triangles[triangle_index])?;
        let plane = TrianglePlane::from_triangle(vertices)?;
        Some(RaycastHit {
            point: origin + direction * distance,
            normal: plane.normal(),
            distance,
            vertices,
            triangle_index,
            front_facing: plane.faces(origin),
        })
    }

    fn corners(&self, tri: &[u32; 3]) -> Option<[DVec3; 3]> {
        Some([
            *self.vertices.get(tri[0] as usize)?,
            *self.vertices.get(tri[1] as usize)?,
            *self.vertices.get(tri[2] as usize)?,
        ])
    }
}

/// Möller–Trumbore ray-triangle intersection.
///
/// Returns the ray parameter of the hit, positive hits only. Both triangle
/// sides are hit.
pub fn ray_triangle_intersect(
    origin: DVec3,
    dir: DVec3,
    v0: DVec3,
    v1: DVec3,
    v2: DVec3,
) -> Option<f64> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = dir.cross(edge2);
    let a = edge1.dot(h);

    // Ray parallel to triangle
    if a.abs() < RAY_EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * dir.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    (t > RAY_EPSILON).then_some(t)
}

/// Slab test against an axis-aligned box, forward hits only.
fn ray_hits_box(origin: DVec3, dir: DVec3, min: DVec3, max: DVec3) -> bool {
    let mut t_near = 0.0_f64;
    let mut t_far = f64::INFINITY;
    for axis in 0..3 {
        let (o, d) = (origin[axis], dir[axis]);
        if d.abs() < RAY_EPSILON {
            if o < min[axis] - RAY_EPSILON || o > max[axis] + RAY_EPSILON {
                return false;
            }
            continue;
        }
        let t0 = (min[axis] - o) / d;
        let t1 = (max[axis] - o) / d;
        let (t0, t1) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far + RAY_EPSILON {
            return false;
        }
    }
    true
}
