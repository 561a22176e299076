//! # Mesh Colors
//!
//! Per-vertex color buffer that visualizes material assignments.
//!
//! Colors are recomputed every frame from the project, but only pushed to
//! the mesh when something actually changed.

use crate::error::{MeshError, MeshResult};
use crate::lookup::MeshTriangleLookupTable;
use crate::mesh::Mesh;
use config::constants::{material_color, DEFAULT_COLOR};
use shape_model::Project;

/// RGBA per mesh vertex plus a dirty flag.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshColors {
    colors: Vec<[f32; 4]>,
    dirty: bool,
}

impl MeshColors {
    /// White buffer for `vertex_count` vertices, dirty so the first
    /// [`apply`](Self::apply) uploads it.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            colors: vec![DEFAULT_COLOR; vertex_count],
            dirty: true,
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[[f32; 4]] {
        &self.colors
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Sets one vertex color. Returns true when the color changed.
    pub fn set_vertex_color(&mut self, vertex: usize, color: [f32; 4]) -> bool {
        match self.colors.get_mut(vertex) {
            Some(slot) if *slot != color => {
                *slot = color;
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    /// Sets the color of all three corners of a triangle.
    pub fn set_triangle_color(&mut self, triangle: [u32; 3], color: [f32; 4]) -> bool {
        let mut changed = false;
        for vertex in triangle {
            changed |= self.set_vertex_color(vertex as usize, color);
        }
        changed
    }

    /// Pushes the buffer to `mesh` when dirty. Returns whether it did.
    ///
    /// # Errors
    ///
    /// [`MeshError::DegenerateGeometry`] when the buffer was built for a
    /// different vertex count.
    pub fn apply(&mut self, mesh: &mut Mesh) -> MeshResult<bool> {
        if self.colors.len() != mesh.vertex_count() {
            return Err(MeshError::degenerate(format!(
                "color buffer has {} entries for {} vertices",
                self.colors.len(),
                mesh.vertex_count()
            )));
        }
        if !self.dirty {
            return Ok(false);
        }
        mesh.set_colors(self.colors.clone());
        self.dirty = false;
        Ok(true)
    }
}

/// Recolors every triangle from the current material assignments and
/// uploads the result if anything changed.
///
/// Side walls take their first segment's material, front and back caps the
/// owning shape's front or back material. Unmatched triangles stay white.
/// Owners are read through the slots resolved when `lookup` was built.
pub fn update_mesh_colors(
    colors: &mut MeshColors,
    project: &Project,
    mesh: &mut Mesh,
    lookup: &MeshTriangleLookupTable,
) -> MeshResult<bool> {
    for (index, triangle) in mesh.triangles().iter().enumerate() {
        let color = triangle_color(project, lookup, index);
        colors.set_triangle_color(*triangle, color);
    }
    colors.apply(mesh)
}

fn triangle_color(project: &Project, lookup: &MeshTriangleLookupTable, index: usize) -> [f32; 4] {
    lookup
        .material_slot(index)
        .and_then(|slot| slot.material(project))
        .map_or(DEFAULT_COLOR, material_color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decompose::decompose_shapes;
    use crate::extrude::create_extruded_polygon_mesh;
    use crate::lookup::TriangleFacing;
    use config::constants::{EditorConfig, MATERIAL_COLORS};
    use glam::DVec2;
    use shape_model::{SegmentKey, Shape};

    #[test]
    fn test_set_vertex_color_tracks_changes() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(glam::DVec3::ZERO);
        mesh.add_vertex(glam::DVec3::X);

        let mut colors = MeshColors::new(2);
        assert!(colors.is_dirty());
        assert!(colors.apply(&mut mesh).unwrap());
        assert!(!colors.is_dirty());
        assert!(!colors.apply(&mut mesh).unwrap());

        assert!(!colors.set_vertex_color(0, DEFAULT_COLOR));
        assert!(!colors.is_dirty());
        assert!(colors.set_vertex_color(1, MATERIAL_COLORS[2]));
        assert!(colors.is_dirty());
        assert!(!colors.set_vertex_color(5, MATERIAL_COLORS[2]));

        assert!(colors.apply(&mut mesh).unwrap());
        assert_eq!(mesh.colors().unwrap()[1], MATERIAL_COLORS[2]);
    }

    #[test]
    fn test_apply_rejects_size_mismatch() {
        let mut colors = MeshColors::new(3);
        assert!(matches!(
            colors.apply(&mut Mesh::new()),
            Err(MeshError::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn test_update_mesh_colors_uses_materials() {
        let mut shape = Shape::rectangle(DVec2::ZERO, DVec2::ONE);
        shape.front_material = 1;
        shape.back_material = 2;
        let wall = shape.segments()[0].id();
        shape.segment_mut(wall).unwrap().material = 3;

        let mut project = Project::new();
        let id = project.add_shape(shape);
        let mut mesh =
            create_extruded_polygon_mesh(&decompose_shapes(project.shapes()), 0.5).unwrap();
        let lookup = MeshTriangleLookupTable::build(&project, &mesh, &EditorConfig::default());
        let mut colors = MeshColors::new(mesh.vertex_count());

        assert!(update_mesh_colors(&mut colors, &project, &mut mesh, &lookup).unwrap());
        let uploaded = mesh.colors().unwrap().to_vec();

        for t in lookup.triangles_for_segment(SegmentKey::new(id, wall)).unwrap() {
            for v in mesh.triangle(*t).unwrap() {
                assert_eq!(uploaded[v as usize], MATERIAL_COLORS[3]);
            }
        }
        for (facing, color) in [
            (TriangleFacing::Front, MATERIAL_COLORS[1]),
            (TriangleFacing::Back, MATERIAL_COLORS[2]),
        ] {
            for t in lookup.cap_triangles(id, facing) {
                for v in mesh.triangle(t).unwrap() {
                    assert_eq!(uploaded[v as usize], color);
                }
            }
        }

        // Nothing changed: no upload.
        assert!(!update_mesh_colors(&mut colors, &project, &mut mesh, &lookup).unwrap());
    }
}
