//! # Editing Operations
//!
//! Selection-driven edits. Each registers an undo snapshot through the
//! supplied [`UndoRecorder`] before it changes anything, and does nothing
//! (and records nothing) when there is nothing to change.

use super::Project;
use crate::editor::{labels, UndoRecorder};
use crate::error::ModelResult;
use crate::generator::GeneratorKind;
use crate::id::ShapeId;
use crate::shape::Shape;
use glam::DVec2;
use log::debug;

impl Project {
    /// Removes every selected segment and prunes shapes left empty.
    ///
    /// Returns the number of removed segments.
    pub fn delete_selection(&mut self, undo: &mut dyn UndoRecorder) -> usize {
        if !self.has_selection() {
            return 0;
        }
        undo.register_undo(labels::DELETE_SELECTION);

        let mut removed = 0;
        for shape in &mut self.shapes {
            for id in shape.selected_segment_ids() {
                if shape.remove_segment(id) {
                    removed += 1;
                }
            }
        }
        self.shapes.retain(|shape| !shape.is_empty());
        debug!("Deleted {removed} segment(s)");
        removed
    }

    /// Switches every selected segment to a fresh generator of `kind`, or
    /// back to Linear when it already uses `kind`.
    ///
    /// Returns the number of changed segments.
    pub fn toggle_generator_for_selection(
        &mut self,
        kind: GeneratorKind,
        undo: &mut dyn UndoRecorder,
    ) -> ModelResult<usize> {
        if !self.has_selection() {
            return Ok(0);
        }
        undo.register_undo(labels::TOGGLE_GENERATOR);

        let mut changed = 0;
        for shape in &mut self.shapes {
            for id in shape.selected_segment_ids() {
                let current = shape.segment(id).map(|s| s.generator_kind());
                let target = if current == Some(kind) {
                    GeneratorKind::Linear
                } else {
                    kind
                };
                shape.set_generator(id, target)?;
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Bakes the generators of all selected segments into real segments.
    ///
    /// Returns the number of inserted segments.
    pub fn apply_generator_for_selection(
        &mut self,
        undo: &mut dyn UndoRecorder,
    ) -> ModelResult<usize> {
        if !self.has_selection() {
            return Ok(0);
        }
        undo.register_undo(labels::APPLY_GENERATOR);

        let mut inserted = 0;
        for shape in &mut self.shapes {
            for id in shape.selected_segment_ids() {
                inserted += shape.apply_generator(id)?;
            }
        }
        debug!("Applied generators, {inserted} segment(s) inserted");
        Ok(inserted)
    }

    /// Resets every segment and face material to slot 0.
    pub fn reset_materials(&mut self, undo: &mut dyn UndoRecorder) {
        undo.register_undo(labels::RESET_MATERIALS);
        for shape in &mut self.shapes {
            shape.front_material = 0;
            shape.back_material = 0;
            for segment in &mut shape.segments {
                segment.material = 0;
            }
        }
    }

    /// Rounds the positions of selected segments to multiples of `snap`.
    ///
    /// A non-positive or non-finite `snap` is ignored. Returns the number of
    /// snapped segments.
    pub fn snap_selection_to_grid(&mut self, snap: f64, undo: &mut dyn UndoRecorder) -> usize {
        if !(snap.is_finite() && snap > 0.0) || !self.has_selection() {
            return 0;
        }
        undo.register_undo(labels::SNAP_TO_GRID);

        let mut snapped = 0;
        for shape in &mut self.shapes {
            for segment in shape.segments.iter_mut().filter(|s| s.selected) {
                segment.position = (segment.position / snap).round() * snap;
                snapped += 1;
            }
        }
        snapped
    }

    /// Appends the default 2x2 square centred on the origin.
    pub fn add_default_shape(&mut self, undo: &mut dyn UndoRecorder) -> ShapeId {
        undo.register_undo(labels::ADD_SHAPE);
        self.add_shape(Shape::rectangle(DVec2::splat(-1.0), DVec2::splat(1.0)))
    }
}
