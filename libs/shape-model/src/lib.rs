//! # Shape Model
//!
//! Editable 2D shape data for the extrusion core.
//!
//! ## Architecture
//!
//! ```text
//! Project ─► Shape (ring of Segments) ─► SegmentGenerator (edge expansion)
//! ```
//!
//! A [`Project`] holds shapes in draw order. Each [`Shape`] is a closed ring
//! of [`Segment`]s; every segment owns the edge to its successor, including
//! the [`SegmentGenerator`] that expands that edge into intermediate points.
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec2;
//! use shape_model::{GeneratorKind, NoUndo, Project, Shape};
//!
//! let mut project = Project::new();
//! let id = project.add_shape(Shape::rectangle(DVec2::ZERO, DVec2::splat(4.0)));
//!
//! project.shape_mut(id).unwrap().segments_mut()[0].selected = true;
//! project
//!     .toggle_generator_for_selection(GeneratorKind::Sine, &mut NoUndo)
//!     .unwrap();
//!
//! assert!(project.validate().is_clean());
//! assert!(project.shape(id).unwrap().outline().len() > 4);
//! ```

pub mod editor;
pub mod error;
pub mod generator;
pub mod id;
pub mod math;
pub mod project;
pub mod segment;
pub mod shape;

pub use editor::{GridProjection, GridTransform, NoUndo, UndoLog, UndoRecorder};
pub use error::{ModelError, ModelResult};
pub use generator::{
    BezierGenerator, GeneratorKind, GeneratorParameter, IntermediatePoints, RepeatGenerator,
    SegmentGenerator, SineGenerator,
};
pub use id::{SegmentId, SegmentKey, ShapeId};
pub use math::Bounds2D;
pub use project::{Project, SegmentLine, ValidationReport};
pub use segment::Segment;
pub use shape::{EdgeLines, SegmentPoints, Shape};
