//! # Mesh Viewport
//!
//! Owns the consistency group derived from a project: the extruded mesh,
//! its raycast structure, the triangle lookup table and the color buffer.
//!
//! The group is rebuilt as a whole. A failed rebuild leaves the previous
//! group untouched.
//!
//! ## Pipeline
//!
//! ```text
//! Project ─validate─▶ decompose ─▶ bounds ─▶ extrude ─▶ raycast
//!                                                    └─▶ lookup ─▶ colors
//! ```

use crate::colors::{self, MeshColors};
use crate::decompose::decompose_shapes;
use crate::error::MeshResult;
use crate::extrude::extrude_within_limits;
use crate::lookup::{MeshTriangleLookupTable, TriangleFacing};
use crate::mesh::Mesh;
use crate::polygon::{calculate_bounds_2d, ConvexPolygon2D};
use crate::raycast::{MeshRaycast, RaycastHit};
use config::constants::EditorConfig;
use glam::DVec3;
use log::debug;
use shape_model::{Bounds2D, Project, SegmentKey, ShapeId, ValidationReport};

// =============================================================================
// PICK TYPES
// =============================================================================

/// Which cap of a shape was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceSide {
    Front,
    Back,
}

impl FaceSide {
    fn facing(self) -> TriangleFacing {
        match self {
            FaceSide::Front => TriangleFacing::Front,
            FaceSide::Back => TriangleFacing::Back,
        }
    }
}

/// Model element under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickTarget {
    /// Side wall extruded from a segment.
    Segment(SegmentKey),
    /// Front or back cap of a shape.
    Face { shape: ShapeId, side: FaceSide },
}

impl PickTarget {
    /// Material currently assigned to the target, `None` if it no longer
    /// exists in `project`.
    pub fn material(&self, project: &Project) -> Option<u8> {
        match *self {
            PickTarget::Segment(key) => project.segment(key).map(|s| s.material),
            PickTarget::Face { shape, side } => project.shape(shape).map(|s| match side {
                FaceSide::Front => s.front_material,
                FaceSide::Back => s.back_material,
            }),
        }
    }

    /// Assigns `material` to the target. Returns true when it changed.
    pub(crate) fn set_material(&self, project: &mut Project, material: u8) -> bool {
        let slot = match *self {
            PickTarget::Segment(key) => project.segment_mut(key).map(|s| &mut s.material),
            PickTarget::Face { shape, side } => project.shape_mut(shape).map(|s| match side {
                FaceSide::Front => &mut s.front_material,
                FaceSide::Back => &mut s.back_material,
            }),
        };
        match slot {
            Some(slot) if *slot != material => {
                *slot = material;
                true
            }
            _ => false,
        }
    }
}

/// Raycast hit resolved to a model element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick {
    pub hit: RaycastHit,
    pub target: PickTarget,
}

/// What a rebuild produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RebuildSummary {
    pub validation: ValidationReport,
    pub polygon_count: usize,
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub bounds: Option<Bounds2D>,
}

// =============================================================================
// VIEWPORT
// =============================================================================

/// One consistent snapshot of everything derived from the project.
#[derive(Debug, Clone)]
pub struct ViewportState {
    pub polygons: Vec<ConvexPolygon2D>,
    pub bounds: Option<Bounds2D>,
    pub mesh: Mesh,
    pub raycast: MeshRaycast,
    pub lookup: MeshTriangleLookupTable,
    pub colors: MeshColors,
}

/// Rebuildable mesh view of a project.
///
/// # Example
///
/// ```rust
/// use config::constants::EditorConfig;
/// use glam::DVec2;
/// use shape_mesh::MeshViewport;
/// use shape_model::{Project, Shape};
///
/// let mut project = Project::new();
/// project.add_shape(Shape::rectangle(DVec2::ZERO, DVec2::ONE));
///
/// let mut viewport = MeshViewport::new(EditorConfig::default());
/// let summary = viewport.rebuild(&mut project).unwrap();
/// assert_eq!(summary.triangle_count, 12);
/// ```
#[derive(Debug, Clone)]
pub struct MeshViewport {
    config: EditorConfig,
    state: Option<ViewportState>,
    needs_rebuild: bool,
}

impl Default for MeshViewport {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl MeshViewport {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            state: None,
            needs_rebuild: true,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Replaces the configuration; the next [`ensure_built`](Self::ensure_built)
    /// rebuilds.
    pub fn set_config(&mut self, config: EditorConfig) {
        if self.config != config {
            self.config = config;
            self.needs_rebuild = true;
        }
    }

    /// Marks the group stale after a topology change.
    pub fn invalidate(&mut self) {
        self.needs_rebuild = true;
    }

    pub fn is_built(&self) -> bool {
        self.state.is_some()
    }

    pub fn needs_rebuild(&self) -> bool {
        self.needs_rebuild
    }

    pub fn state(&self) -> Option<&ViewportState> {
        self.state.as_ref()
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        self.state.as_ref().map(|s| &s.mesh)
    }

    pub fn lookup(&self) -> Option<&MeshTriangleLookupTable> {
        self.state.as_ref().map(|s| &s.lookup)
    }

    pub fn raycast_structure(&self) -> Option<&MeshRaycast> {
        self.state.as_ref().map(|s| &s.raycast)
    }

    /// Validates `project` and rebuilds the whole group from it.
    ///
    /// # Errors
    ///
    /// Any [`MeshError`](crate::MeshError) from extrusion or coloring. The
    /// previous group stays in place; repairs made by validation do not roll
    /// back.
    pub fn rebuild(&mut self, project: &mut Project) -> MeshResult<RebuildSummary> {
        let validation = project.validate();

        let mut polygons = decompose_shapes(project.shapes());
        let bounds = calculate_bounds_2d(&mut polygons);
        let mut mesh = extrude_within_limits(
            &polygons,
            self.config.extrude_depth,
            self.config.max_vertices,
            self.config.max_triangles,
        )?;
        let raycast = MeshRaycast::new(&mesh);
        let lookup = MeshTriangleLookupTable::build(project, &mesh, &self.config);
        let mut colors = MeshColors::new(mesh.vertex_count());
        colors::update_mesh_colors(&mut colors, project, &mut mesh, &lookup)?;

        let summary = RebuildSummary {
            validation,
            polygon_count: polygons.len(),
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
            bounds,
        };
        debug!(
            "viewport rebuilt: {} polygons, {} triangles",
            summary.polygon_count, summary.triangle_count
        );

        self.state = Some(ViewportState {
            polygons,
            bounds,
            mesh,
            raycast,
            lookup,
            colors,
        });
        self.needs_rebuild = false;
        Ok(summary)
    }

    /// Rebuilds when nothing is built yet or the group was invalidated.
    /// Returns whether a rebuild happened.
    pub fn ensure_built(&mut self, project: &mut Project) -> MeshResult<bool> {
        if self.state.is_some() && !self.needs_rebuild {
            return Ok(false);
        }
        self.rebuild(project)?;
        Ok(true)
    }

    /// Per-frame color refresh. Returns whether colors were uploaded.
    pub fn update_mesh_colors(&mut self, project: &Project) -> MeshResult<bool> {
        match self.state.as_mut() {
            Some(state) => colors::update_mesh_colors(
                &mut state.colors,
                project,
                &mut state.mesh,
                &state.lookup,
            ),
            None => Ok(false),
        }
    }

    // =========================================================================
    // PICKING
    // =========================================================================

    /// Closest model element hit by a ray.
    pub fn pick(&self, origin: DVec3, direction: DVec3) -> Option<Pick> {
        let state = self.state.as_ref()?;
        let hit = state.raycast.raycast(origin, direction)?;
        let index = hit.triangle_index;
        let target = match state.lookup.facing(index)? {
            TriangleFacing::SideWall => {
                PickTarget::Segment(*state.lookup.segments_for_triangle(index)?.first()?)
            }
            facing => PickTarget::Face {
                shape: *state.lookup.shapes_for_triangle(index)?.first()?,
                side: if facing == TriangleFacing::Front {
                    FaceSide::Front
                } else {
                    FaceSide::Back
                },
            },
        };
        Some(Pick { hit, target })
    }

    /// Material of the element under the pointer, for tooltips.
    pub fn material_under_pointer(
        &self,
        project: &Project,
        origin: DVec3,
        direction: DVec3,
    ) -> Option<u8> {
        self.pick(origin, direction)?.target.material(project)
    }

    /// Corner positions of every triangle belonging to `target`.
    pub fn highlight_triangles(&self, target: &PickTarget) -> Vec<[DVec3; 3]> {
        let Some(state) = self.state.as_ref() else {
            return Vec::new();
        };
        let indices = match *target {
            PickTarget::Segment(key) => state
                .lookup
                .triangles_for_segment(key)
                .map(<[usize]>::to_vec)
                .unwrap_or_default(),
            PickTarget::Face { shape, side } => state.lookup.cap_triangles(shape, side.facing()),
        };
        indices
            .into_iter()
            .filter_map(|i| state.mesh.triangle_vertices(i))
            .collect()
    }
}
