//! # Triangle Lookup Table
//!
//! Maps mesh triangles back to the segments and shapes they were extruded
//! from, and segments forward to their wall triangles.
//!
//! Built once per mesh rebuild from the same project snapshot the mesh was
//! generated from. Queries never rebuild anything.
//!
//! ## Matching
//!
//! - **Side walls** (`|normal.z| < side_wall_epsilon`): the triangle is
//!   flattened onto the grid and its longest edge is matched against every
//!   expanded sub-edge of every segment. The first segment in project order
//!   with a collinear overlap claims the triangle.
//! - **Caps**: the flattened centroid is tested against each shape outline
//!   in project order; the first containing shape claims the triangle.
//!
//! Each claimed triangle also gets a [`MaterialSlot`] holding the owner's
//! position in the project, so per-frame material reads skip the id search.

use std::collections::HashMap;

use crate::extrude::mesh_to_grid;
use crate::mesh::Mesh;
use crate::plane::TrianglePlane;
use config::constants::EditorConfig;
use glam::{DVec2, DVec3};
use log::debug;
use shape_model::math::{lines_overlap, winding_number};
use shape_model::{Bounds2D, Project, SegmentKey, ShapeId};

/// Which part of the extrusion a triangle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriangleFacing {
    SideWall,
    /// Cap at `z = 0`, facing -z.
    Front,
    /// Cap at `z = depth`, facing +z.
    Back,
}

/// Where the material of a triangle's owner is stored.
///
/// Indices are positions in [`Project::shapes`] and [`Shape::segments`] at
/// build time. They are checked against the ids on every read and fall
/// back to an id search once the project has been reordered.
///
/// [`Shape::segments`]: shape_model::Shape::segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialSlot {
    Segment {
        key: SegmentKey,
        shape_index: usize,
        segment_index: usize,
    },
    Face {
        shape: ShapeId,
        shape_index: usize,
        facing: TriangleFacing,
    },
}

impl MaterialSlot {
    /// Current material of the owner, `None` once it was removed.
    pub fn material(&self, project: &Project) -> Option<u8> {
        match *self {
            MaterialSlot::Segment {
                key,
                shape_index,
                segment_index,
            } => project
                .shapes()
                .get(shape_index)
                .filter(|shape| shape.id() == key.shape)
                .and_then(|shape| shape.segments().get(segment_index))
                .filter(|segment| segment.id() == key.segment)
                .or_else(|| project.segment(key))
                .map(|segment| segment.material),
            MaterialSlot::Face {
                shape,
                shape_index,
                facing,
            } => project
                .shapes()
                .get(shape_index)
                .filter(|owner| owner.id() == shape)
                .or_else(|| project.shape(shape))
                .map(|owner| match facing {
                    TriangleFacing::Back => owner.back_material,
                    _ => owner.front_material,
                }),
        }
    }
}

/// Bidirectional triangle / segment / shape index for one mesh snapshot.
#[derive(Debug, Clone, Default)]
pub struct MeshTriangleLookupTable {
    segment_triangles: HashMap<SegmentKey, Vec<usize>>,
    triangle_segments: HashMap<usize, Vec<SegmentKey>>,
    triangle_shapes: HashMap<usize, Vec<ShapeId>>,
    facings: Vec<Option<TriangleFacing>>,
    slots: Vec<Option<MaterialSlot>>,
}

/// Expanded sub-edges of one segment, with a bounding box for quick rejects.
struct SegmentEdges {
    key: SegmentKey,
    shape_index: usize,
    segment_index: usize,
    lines: Vec<(DVec2, DVec2)>,
    bounds: Bounds2D,
}

impl MeshTriangleLookupTable {
    /// Indexes every triangle of `mesh` against `project`.
    ///
    /// Triangles that match nothing stay unindexed.
    pub fn build(project: &Project, mesh: &Mesh, config: &EditorConfig) -> Self {
        let edges = collect_segment_edges(project, config.edge_match_epsilon);
        let outlines: Vec<(usize, ShapeId, Vec<DVec2>)> = project
            .shapes()
            .iter()
            .enumerate()
            .map(|(index, shape)| (index, shape.id(), shape.outline()))
            .filter(|(_, _, outline)| outline.len() >= 3)
            .collect();

        let mut table = Self {
            facings: vec![None; mesh.triangle_count()],
            slots: vec![None; mesh.triangle_count()],
            ..Self::default()
        };

        for index in 0..mesh.triangle_count() {
            let Some(corners) = mesh.triangle_vertices(index) else {
                continue;
            };
            let Some(plane) = TrianglePlane::from_triangle(corners) else {
                continue;
            };

            let facing = plane.facing(config.side_wall_epsilon);
            table.facings[index] = Some(facing);
            if facing == TriangleFacing::SideWall {
                let (a, b) = longest_flat_edge(&corners);
                if let Some(edge) = match_segment(&edges, a, b, config.edge_match_epsilon) {
                    let key = edge.key;
                    table.segment_triangles.entry(key).or_default().push(index);
                    table.triangle_segments.entry(index).or_default().push(key);
                    table.slots[index] = Some(MaterialSlot::Segment {
                        key,
                        shape_index: edge.shape_index,
                        segment_index: edge.segment_index,
                    });
                }
            } else {
                let centroid = mesh_to_grid((corners[0] + corners[1] + corners[2]) / 3.0);
                let owner = outlines
                    .iter()
                    .find(|(_, _, outline)| winding_number(centroid, outline) != 0);
                if let Some(&(shape_index, shape, _)) = owner {
                    table.triangle_shapes.entry(index).or_default().push(shape);
                    table.slots[index] = Some(MaterialSlot::Face {
                        shape,
                        shape_index,
                        facing,
                    });
                }
            }
        }

        debug!(
            "lookup table: {} triangles, {} segments with walls, {} cap triangles owned",
            mesh.triangle_count(),
            table.segment_triangles.len(),
            table.triangle_shapes.len()
        );
        table
    }

    /// Wall triangles extruded from a segment.
    pub fn triangles_for_segment(&self, key: SegmentKey) -> Option<&[usize]> {
        self.segment_triangles.get(&key).map(Vec::as_slice)
    }

    /// Segments owning a wall triangle.
    pub fn segments_for_triangle(&self, triangle: usize) -> Option<&[SegmentKey]> {
        self.triangle_segments.get(&triangle).map(Vec::as_slice)
    }

    /// Shapes owning a cap triangle.
    pub fn shapes_for_triangle(&self, triangle: usize) -> Option<&[ShapeId]> {
        self.triangle_shapes.get(&triangle).map(Vec::as_slice)
    }

    /// Classification of a triangle; `None` for degenerate or unknown ones.
    pub fn facing(&self, triangle: usize) -> Option<TriangleFacing> {
        self.facings.get(triangle).copied().flatten()
    }

    /// Owner material slot of a triangle, `None` when unclaimed.
    pub fn material_slot(&self, triangle: usize) -> Option<MaterialSlot> {
        self.slots.get(triangle).copied().flatten()
    }

    pub fn triangle_count(&self) -> usize {
        self.facings.len()
    }

    /// Cap triangles of one side of a shape, in mesh order.
    pub fn cap_triangles(&self, shape: ShapeId, facing: TriangleFacing) -> Vec<usize> {
        let mut triangles: Vec<usize> = self
            .triangle_shapes
            .iter()
            .filter(|(index, shapes)| {
                shapes.contains(&shape) && self.facing(**index) == Some(facing)
            })
            .map(|(index, _)| *index)
            .collect();
        triangles.sort_unstable();
        triangles
    }
}

fn collect_segment_edges(project: &Project, epsilon: f64) -> Vec<SegmentEdges> {
    let mut all = Vec::new();
    for (shape_index, shape) in project.shapes().iter().enumerate() {
        for (segment_index, segment) in shape.segments().iter().enumerate() {
            let Some(lines) = shape.edge_lines(segment.id()) else {
                continue;
            };
            let lines: Vec<(DVec2, DVec2)> = lines.filter(|(a, b)| a != b).collect();
            let Some(bounds) = Bounds2D::from_points(lines.iter().flat_map(|(a, b)| [*a, *b]))
            else {
                continue;
            };
            let pad = DVec2::splat(epsilon);
            all.push(SegmentEdges {
                key: SegmentKey::new(shape.id(), segment.id()),
                shape_index,
                segment_index,
                lines,
                bounds: Bounds2D {
                    min: bounds.min - pad,
                    max: bounds.max + pad,
                },
            });
        }
    }
    all
}

fn match_segment(
    edges: &[SegmentEdges],
    a: DVec2,
    b: DVec2,
    epsilon: f64,
) -> Option<&SegmentEdges> {
    let (lo, hi) = (a.min(b), a.max(b));
    edges
        .iter()
        .filter(|edge| lo.cmple(edge.bounds.max).all() && hi.cmpge(edge.bounds.min).all())
        .find(|edge| {
            edge.lines
                .iter()
                .any(|(p, q)| lines_overlap(a, b, *p, *q, epsilon))
        })
}

/// Longest edge of a triangle after projecting it onto the grid.
fn longest_flat_edge(corners: &[DVec3; 3]) -> (DVec2, DVec2) {
    let flat = corners.map(mesh_to_grid);
    [(flat[0], flat[1]), (flat[1], flat[2]), (flat[2], flat[0])]
        .into_iter()
        .fold((flat[0], flat[1]), |best, edge| {
            if edge.0.distance_squared(edge.1) > best.0.distance_squared(best.1) {
                edge
            } else {
                best
            }
        })
}
