//! # Mesh Data Structure
//!
//! Triangle mesh produced by extrusion: vertices, index triples and
//! per-vertex colors.

use crate::plane::TrianglePlane;
use config::constants::AREA_EPSILON;
use glam::DVec3;

/// A triangle mesh with vertices and indices.
///
/// Triangles are addressed by their position in [`Mesh::triangles`]; the
/// flat index-buffer offset of triangle `i` is `3 * i`.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use shape_mesh::Mesh;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_triangle(0, 1, 2);
/// assert_eq!(mesh.triangle_normal(0), Some(DVec3::Z));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions
    vertices: Vec<DVec3>,
    /// Triangle indices
    triangles: Vec<[u32; 3]>,
    /// Vertex colors (RGBA), one per vertex once set
    colors: Option<Vec<[f32; 4]>>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
            colors: None,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices and returns its triangle index.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) -> usize {
        self.triangles.push([v0, v1, v2]);
        self.triangles.len() - 1
    }

    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    #[inline]
    pub fn triangle(&self, index: usize) -> Option<[u32; 3]> {
        self.triangles.get(index).copied()
    }

    /// Corner positions of a triangle.
    pub fn triangle_vertices(&self, index: usize) -> Option<[DVec3; 3]> {
        let [a, b, c] = self.triangle(index)?;
        Some([
            *self.vertices.get(a as usize)?,
            *self.vertices.get(b as usize)?,
            *self.vertices.get(c as usize)?,
        ])
    }

    /// Unit normal following the triangle's winding, `None` when degenerate.
    pub fn triangle_normal(&self, index: usize) -> Option<DVec3> {
        TrianglePlane::from_triangle(self.triangle_vertices(index)?).map(|plane| plane.normal())
    }

    /// Replaces the vertex colors.
    pub fn set_colors(&mut self, colors: Vec<[f32; 4]>) {
        self.colors = Some(colors);
    }

    pub fn colors(&self) -> Option<&[[f32; 4]]> {
        self.colors.as_deref()
    }

    /// Axis-aligned bounds as `(min, max)`, `None` for a mesh without vertices.
    pub fn bounding_box(&self) -> Option<(DVec3, DVec3)> {
        let (first, rest) = self.vertices.split_first()?;
        Some(rest.iter().fold((*first, *first), |(min, max), v| {
            (min.min(*v), max.max(*v))
        }))
    }

    /// Checks that every index is in range and no triangle is degenerate.
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;

        for tri in &self.triangles {
            if tri.iter().any(|&i| i >= vertex_count) {
                return false;
            }
            if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
                return false;
            }

            let v0 = self.vertices[tri[0] as usize];
            let v1 = self.vertices[tri[1] as usize];
            let v2 = self.vertices[tri[2] as usize];
            if (v1 - v0).cross(v2 - v0).length() < AREA_EPSILON {
                return false;
            }
        }

        true
    }

    /// Exports vertices as a flat `[x, y, z, ...]` f32 array for upload.
    pub fn vertices_f32(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|v| [v.x as f32, v.y as f32, v.z as f32])
            .collect()
    }

    /// Exports triangle indices as a flat `[i0, i1, i2, ...]` array.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }
}
