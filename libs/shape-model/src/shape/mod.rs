//! # Shape
//!
//! A closed outline stored as a ring of [`Segment`]s.
//!
//! Segments live in a `Vec` in ring order; each also carries the id of its
//! successor. Edits keep both in step, and
//! [`Project::validate`](crate::Project::validate) repairs any drift in
//! deserialized data.

mod queries;


use crate::error::{ModelError, ModelResult};
use crate::generator::{GeneratorKind, IntermediatePoints, SegmentGenerator};
use crate::id::{SegmentId, ShapeId};
use crate::segment::Segment;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::iter::{Chain, Once};

/// Lazy point sequence of one segment: its position followed by the
/// generator's intermediate points. The successor's position is excluded.
pub type SegmentPoints<'a> = Chain<Once<DVec2>, IntermediatePoints<'a>>;

/// A closed polygonal outline with face materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub(crate) id: ShapeId,
    pub(crate) segments: Vec<Segment>,
    /// Material of the cap facing -z.
    pub front_material: u8,
    /// Material of the cap facing +z.
    pub back_material: u8,
    #[serde(default)]
    pub(crate) next_segment_id: u32,
}

impl Default for Shape {
    fn default() -> Self {
        Self::new()
    }
}

impl Shape {
    /// Creates an empty shape. Add at least one segment before use.
    pub fn new() -> Self {
        Self {
            id: ShapeId::default(),
            segments: Vec::new(),
            front_material: 0,
            back_material: 0,
            next_segment_id: 0,
        }
    }

    /// Creates a shape whose ring visits `points` in order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec2;
    /// use shape_model::Shape;
    ///
    /// let triangle = Shape::from_points([DVec2::ZERO, DVec2::X, DVec2::Y]);
    /// assert_eq!(triangle.len(), 3);
    /// ```
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = DVec2>,
    {
        let mut shape = Self::new();
        for point in points {
            shape.push_segment(point);
        }
        shape
    }

    /// Axis-aligned rectangle with corners visited min -> (max.x, min.y) -> max.
    pub fn rectangle(min: DVec2, max: DVec2) -> Self {
        Self::from_points([
            min,
            DVec2::new(max.x, min.y),
            max,
            DVec2::new(min.x, max.y),
        ])
    }

    #[inline]
    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Segments in ring order.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Mutable access to segments. Ids and links stay owned by the shape.
    #[inline]
    pub fn segments_mut(&mut self) -> &mut [Segment] {
        &mut self.segments
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }

    pub fn segment_mut(&mut self, id: SegmentId) -> Option<&mut Segment> {
        self.segments.iter_mut().find(|s| s.id == id)
    }

    pub(crate) fn index_of(&self, id: SegmentId) -> Option<usize> {
        self.segments.iter().position(|s| s.id == id)
    }

    /// Successor of a segment, following its `next` link.
    pub fn next_of(&self, id: SegmentId) -> Option<&Segment> {
        self.segment(self.segment(id)?.next?)
    }

    fn allocate_segment_id(&mut self) -> SegmentId {
        let id = SegmentId(self.next_segment_id);
        self.next_segment_id += 1;
        id
    }

    fn unknown(&self, segment: SegmentId) -> ModelError {
        ModelError::UnknownSegment {
            shape: self.id,
            segment,
        }
    }

    // =========================================================================
    // TOPOLOGY
    // =========================================================================

    /// Appends a default-state segment at the end of the ring.
    pub fn push_segment(&mut self, position: DVec2) -> SegmentId {
        let id = self.allocate_segment_id();
        let mut segment = Segment::new(id, position);
        segment.next = Some(self.segments.first().map_or(id, |first| first.id));
        if let Some(last) = self.segments.last_mut() {
            last.next = Some(id);
        }
        self.segments.push(segment);
        id
    }

    /// Inserts a default-state segment directly after `after`.
    ///
    /// # Errors
    ///
    /// [`ModelError::UnknownSegment`] when `after` is not in this shape.
    pub fn insert_segment_after(
        &mut self,
        after: SegmentId,
        position: DVec2,
    ) -> ModelResult<SegmentId> {
        let index = self.index_of(after).ok_or_else(|| self.unknown(after))?;
        let id = self.allocate_segment_id();
        let mut segment = Segment::new(id, position);
        segment.next = self.segments[index].next.or(Some(after));
        self.segments[index].next = Some(id);
        self.segments.insert(index + 1, segment);
        Ok(id)
    }

    /// Unlinks a segment and reconnects its neighbours.
    ///
    /// Returns `false` without changes when the segment is not found.
    pub fn remove_segment(&mut self, id: SegmentId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let removed = self.segments.remove(index);
        let successor = removed.next.filter(|next| *next != id);
        for segment in &mut self.segments {
            if segment.next == Some(id) {
                segment.next = successor;
            }
        }
        true
    }

    /// Re-links every segment to its successor in vector order.
    ///
    /// Returns the number of links that changed.
    pub(crate) fn relink(&mut self) -> usize {
        let n = self.segments.len();
        let mut repaired = 0;
        for i in 0..n {
            let expected = Some(self.segments[(i + 1) % n].id);
            if self.segments[i].next != expected {
                self.segments[i].next = expected;
                repaired += 1;
            }
        }
        repaired
    }

    // =========================================================================
    // POINT SEQUENCES
    // =========================================================================

    /// Lazily yields the segment's position and its generated intermediate
    /// points, excluding the successor's position.
    ///
    /// `None` when the segment is unknown or its ring link is broken.
    pub fn generate_points(&self, id: SegmentId) -> Option<SegmentPoints<'_>> {
        let segment = self.segment(id)?;
        let next = self.next_of(id)?;
        Some(
            std::iter::once(segment.position)
                .chain(segment.generator.intermediate_points(segment.position, next.position)),
        )
    }

    /// Consecutive point pairs of the segment's expanded edge, including the
    /// final pair that ends on the successor's position.
    pub fn edge_lines(&self, id: SegmentId) -> Option<EdgeLines<'_>> {
        let terminator = self.next_of(id)?.position;
        let mut points = self.generate_points(id)?.chain(std::iter::once(terminator));
        let last = points.next();
        Some(EdgeLines { points, last })
    }

    /// Every expanded outline point in ring order, each tagged with the
    /// segment whose edge starts there.
    pub fn outline_with_sources(&self) -> Vec<(DVec2, SegmentId)> {
        let mut outline = Vec::new();
        for segment in &self.segments {
            if let Some(points) = self.generate_points(segment.id) {
                outline.extend(points.map(|p| (p, segment.id)));
            }
        }
        outline
    }

    /// Every expanded outline point in ring order.
    pub fn outline(&self) -> Vec<DVec2> {
        self.outline_with_sources().into_iter().map(|(p, _)| p).collect()
    }

    // =========================================================================
    // GENERATORS
    // =========================================================================

    /// Replaces a segment's generator with a fresh one of `kind`.
    pub fn set_generator(&mut self, id: SegmentId, kind: GeneratorKind) -> ModelResult<()> {
        let to = self.next_of(id).map(|n| n.position);
        let shape = self.id;
        let segment = self
            .segment_mut(id)
            .ok_or(ModelError::UnknownSegment { shape, segment: id })?;
        let to = to.unwrap_or(segment.position);
        segment.generator = SegmentGenerator::new(kind, segment.position, to);
        Ok(())
    }

    /// Bakes a segment's generated points into real segments.
    ///
    /// Each intermediate point becomes a new default-state segment inserted
    /// after the original in sequence order; the original's generator is
    /// then reset to Linear. Returns the number of inserted segments.
    ///
    /// # Errors
    ///
    /// [`ModelError::UnknownSegment`] or [`ModelError::BrokenRing`].
    pub fn apply_generator(&mut self, id: SegmentId) -> ModelResult<usize> {
        let segment = self.segment(id).ok_or_else(|| self.unknown(id))?;
        let next = self.next_of(id).ok_or(ModelError::BrokenRing(id))?;
        let points: Vec<DVec2> = segment
            .generator
            .intermediate_points(segment.position, next.position)
            .collect();

        let mut after = id;
        for point in &points {
            after = self.insert_segment_after(after, *point)?;
        }
        if let Some(segment) = self.segment_mut(id) {
            segment.generator = SegmentGenerator::Linear;
        }
        Ok(points.len())
    }
}

/// Iterator over consecutive point pairs of one segment's expanded edge.
#[derive(Debug, Clone)]
pub struct EdgeLines<'a> {
    points: Chain<SegmentPoints<'a>, Once<DVec2>>,
    last: Option<DVec2>,
}

impl Iterator for EdgeLines<'_> {
    type Item = (DVec2, DVec2);

    fn next(&mut self) -> Option<(DVec2, DVec2)> {
        let b = self.points.next()?;
        let a = self.last.replace(b)?;
        Some((a, b))
    }
}
