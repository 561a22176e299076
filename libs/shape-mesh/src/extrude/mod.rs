//! # Extrusion
//!
//! Extrudes convex polygons along +z into one mesh.
//!
//! ## Layout
//!
//! Grid point `(x, y)` becomes mesh point `(x, -y, z)`: the grid's y axis
//! points down the screen while the mesh's points up.
//!
//! - **Front cap** at `z = 0`, facing -z
//! - **Back cap** at `z = depth`, facing +z
//! - **Side walls**: two outward triangles per polygon edge that carries a
//!   material; interior edges of the decomposition get no wall
//!
//! Every cap ring and every wall quad gets its own vertices so per-vertex
//! colors never bleed between faces.


use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use crate::polygon::ConvexPolygon2D;
use config::constants::{AREA_EPSILON, MAX_TRIANGLES, MAX_VERTICES};
use glam::{DVec2, DVec3};
use log::{debug, trace};
use shape_model::math::{orient2d, signed_area};

/// Maps a grid point to the mesh plane.
#[inline]
pub fn grid_to_mesh(point: DVec2, z: f64) -> DVec3 {
    DVec3::new(point.x, -point.y, z)
}

/// Maps a mesh point back onto the grid, dropping z.
#[inline]
pub fn mesh_to_grid(point: DVec3) -> DVec2 {
    DVec2::new(point.x, -point.y)
}

/// Extrudes every polygon by `depth` into a single mesh, within the default
/// [`MAX_VERTICES`] / [`MAX_TRIANGLES`] limits.
///
/// Polygons whose points are all collinear contribute nothing.
///
/// # Errors
///
/// [`MeshError::InvalidDepth`] for a zero, negative or non-finite depth,
/// [`MeshError::TooManyVertices`] / [`MeshError::TooManyTriangles`] when the
/// result would exceed the limits.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use shape_mesh::{create_extruded_polygon_mesh, ConvexPolygon2D};
///
/// let square = ConvexPolygon2D::new(
///     vec![DVec2::ZERO, DVec2::X, DVec2::ONE, DVec2::Y],
///     0,
///     0,
///     vec![Some(0); 4],
/// );
/// let mesh = create_extruded_polygon_mesh(&[square], 0.5).unwrap();
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
pub fn create_extruded_polygon_mesh(polygons: &[ConvexPolygon2D], depth: f64) -> MeshResult<Mesh> {
    extrude_within_limits(polygons, depth, MAX_VERTICES, MAX_TRIANGLES)
}

/// [`create_extruded_polygon_mesh`] with caller-chosen size limits.
pub fn extrude_within_limits(
    polygons: &[ConvexPolygon2D],
    depth: f64,
    max_vertices: usize,
    max_triangles: usize,
) -> MeshResult<Mesh> {
    if !(depth.is_finite() && depth > 0.0) {
        return Err(MeshError::invalid_depth(depth));
    }

    let rings: Vec<Vec<(DVec2, Option<u8>)>> = polygons.iter().filter_map(mesh_ring).collect();

    let (vertex_count, triangle_count) = rings.iter().fold((0, 0), |(v, t), ring| {
        let walls = wall_edges(ring).count();
        (v + 2 * ring.len() + 4 * walls, t + 2 * (ring.len() - 2) + 2 * walls)
    });
    if vertex_count > max_vertices {
        return Err(MeshError::TooManyVertices {
            count: vertex_count,
            max: max_vertices,
        });
    }
    if triangle_count > max_triangles {
        return Err(MeshError::TooManyTriangles {
            count: triangle_count,
            max: max_triangles,
        });
    }

    let mut mesh = Mesh::with_capacity(vertex_count, triangle_count);
    for ring in &rings {
        add_caps(&mut mesh, ring, depth);
        add_walls(&mut mesh, ring, depth);
    }

    debug!(
        "Extruded {} polygon(s) into {} triangles",
        rings.len(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Polygon points in mesh xy, counter-clockwise seen from +z, each with the
/// material of the edge it starts. `None` for collinear polygons.
fn mesh_ring(polygon: &ConvexPolygon2D) -> Option<Vec<(DVec2, Option<u8>)>> {
    let n = polygon.len();
    let points: Vec<DVec2> = polygon
        .points
        .iter()
        .map(|p| DVec2::new(p.x, -p.y))
        .collect();
    let area = signed_area(&points);
    if n < 3 || area.abs() < AREA_EPSILON {
        trace!("Skipping degenerate polygon with {n} point(s)");
        return None;
    }

    let material = |i: usize| polygon.edge_materials.get(i).copied().flatten();
    let ring = if area > 0.0 {
        (0..n).map(|i| (points[i], material(i))).collect()
    } else {
        (0..n)
            .map(|j| (points[n - 1 - j], material((2 * n - 2 - j) % n)))
            .collect()
    };
    Some(ring)
}

fn wall_edges(ring: &[(DVec2, Option<u8>)]) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
    let n = ring.len();
    (0..n).filter_map(move |i| {
        let (a, material) = ring[i];
        let b = ring[(i + 1) % n].0;
        (material.is_some() && a != b).then_some((a, b))
    })
}

/// Fan-triangulates both caps, skipping fan triangles below [`AREA_EPSILON`].
fn add_caps(mesh: &mut Mesh, ring: &[(DVec2, Option<u8>)], depth: f64) {
    let n = ring.len();
    let front = mesh.vertex_count() as u32;
    for (point, _) in ring {
        mesh.add_vertex(DVec3::new(point.x, point.y, 0.0));
    }
    let back = mesh.vertex_count() as u32;
    for (point, _) in ring {
        mesh.add_vertex(DVec3::new(point.x, point.y, depth));
    }

    for i in 1..n - 1 {
        // orient2d is twice the signed area
        if orient2d(ring[0].0, ring[i].0, ring[i + 1].0) <= 2.0 * AREA_EPSILON {
            continue;
        }
        let (i, j) = (i as u32, (i + 1) as u32);
        // Front cap faces -z: clockwise seen from +z
        mesh.add_triangle(front, front + j, front + i);
        mesh.add_triangle(back, back + i, back + j);
    }
}

/// Two outward triangles per wall edge, four fresh vertices each.
fn add_walls(mesh: &mut Mesh, ring: &[(DVec2, Option<u8>)], depth: f64) {
    for (a, b) in wall_edges(ring) {
        let a0 = mesh.add_vertex(DVec3::new(a.x, a.y, 0.0));
        let b0 = mesh.add_vertex(DVec3::new(b.x, b.y, 0.0));
        let b1 = mesh.add_vertex(DVec3::new(b.x, b.y, depth));
        let a1 = mesh.add_vertex(DVec3::new(a.x, a.y, depth));
        mesh.add_triangle(a0, b0, b1);
        mesh.add_triangle(a0, b1, a1);
    }
}
