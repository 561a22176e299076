//! # Shape Mesh
//!
//! Turns a [`shape_model::Project`] into an extruded triangle mesh and maps
//! mesh triangles back to the segments and shapes they came from.
//!
//! ## Architecture
//!
//! ```text
//! shape-model (Project) → decompose → extrude (Mesh) → raycast + lookup → tools
//! ```
//!
//! ## Algorithms
//!
//! - **Convex decomposition**: hole bridging, ear clipping, Hertel–Mehlhorn
//! - **Extrusion**: fan-triangulated caps, one quad per outline edge
//! - **Raycast**: Möller–Trumbore against every triangle
//! - **Lookup**: collinear edge overlap for walls, winding test for caps
//!
//! ## Usage
//!
//! ```rust
//! use glam::{DVec2, DVec3};
//! use shape_mesh::{MeshViewport, PickTarget};
//! use shape_model::{Project, Shape};
//!
//! let mut project = Project::new();
//! let id = project.add_shape(Shape::rectangle(DVec2::ZERO, DVec2::splat(2.0)));
//!
//! let mut viewport = MeshViewport::default();
//! viewport.rebuild(&mut project).unwrap();
//!
//! let pick = viewport
//!     .pick(DVec3::new(0.5, -0.25, -1.0), DVec3::Z)
//!     .unwrap();
//! assert!(matches!(pick.target, PickTarget::Face { shape, .. } if shape == id));
//! ```

pub mod colors;
pub mod decompose;
pub mod error;
pub mod extrude;
pub mod lookup;
pub mod mesh;
pub mod plane;
pub mod polygon;
pub mod raycast;
pub mod tools;
pub mod viewport;

pub use colors::{update_mesh_colors, MeshColors};
pub use decompose::decompose_shapes;
pub use error::{MeshError, MeshResult};
pub use extrude::{create_extruded_polygon_mesh, extrude_within_limits, grid_to_mesh, mesh_to_grid};
pub use lookup::{MaterialSlot, MeshTriangleLookupTable, TriangleFacing};
pub use mesh::Mesh;
pub use polygon::{calculate_bounds_2d, ConvexPolygon2D};
pub use raycast::{MeshRaycast, RaycastHit};
pub use tools::{BrushTool, HoverInfo, InspectTool, MaterialTool, PointerRay, ToolContext};
pub use viewport::{FaceSide, MeshViewport, Pick, PickTarget, RebuildSummary, ViewportState};
