//! # Project
//!
//! Ordered collection of shapes. Order is draw order and decides every
//! first-match tie-break in the picking and lookup queries.

mod editing;
mod picking;
mod validate;


pub use picking::SegmentLine;
pub use validate::ValidationReport;

use crate::id::{SegmentKey, ShapeId};
use crate::segment::Segment;
use crate::shape::Shape;
use serde::{Deserialize, Serialize};

/// The editable document: all shapes in draw order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Project {
    shapes: Vec<Shape>,
    #[serde(default)]
    next_shape_id: u32,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a shape, assigning it a fresh project-unique id.
    pub fn add_shape(&mut self, mut shape: Shape) -> ShapeId {
        let id = ShapeId(self.next_shape_id);
        self.next_shape_id += 1;
        shape.id = id;
        self.shapes.push(shape);
        id
    }

    /// Removes and returns a shape.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.shapes.iter().position(|s| s.id == id)?;
        Some(self.shapes.remove(index))
    }

    /// Shapes in draw order.
    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[inline]
    pub fn shapes_mut(&mut self) -> &mut [Shape] {
        &mut self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    pub fn segment(&self, key: SegmentKey) -> Option<&Segment> {
        self.shape(key.shape)?.segment(key.segment)
    }

    pub fn segment_mut(&mut self, key: SegmentKey) -> Option<&mut Segment> {
        self.shape_mut(key.shape)?.segment_mut(key.segment)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Total number of segments across all shapes.
    pub fn segment_count(&self) -> usize {
        self.shapes.iter().map(Shape::len).sum()
    }
}
