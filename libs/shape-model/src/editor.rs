//! # Editor Interfaces
//!
//! Seams between the model and the surrounding editor: the undo stack and
//! the grid/screen coordinate mapping. The model calls into these traits and
//! never owns either service.

use glam::DVec2;

// =============================================================================
// UNDO
// =============================================================================

/// Receives a snapshot request before every destructive edit.
///
/// The implementation decides what to capture; the model only supplies a
/// human-readable label.
pub trait UndoRecorder {
    fn register_undo(&mut self, label: &str);
}

/// Recorder that ignores every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUndo;

impl UndoRecorder for NoUndo {
    fn register_undo(&mut self, _label: &str) {}
}

/// Recorder that keeps the labels it received, oldest first.
#[derive(Debug, Clone, Default)]
pub struct UndoLog {
    labels: Vec<String>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn last(&self) -> Option<&str> {
        self.labels.last().map(String::as_str)
    }
}

impl UndoRecorder for UndoLog {
    fn register_undo(&mut self, label: &str) {
        self.labels.push(label.to_owned());
    }
}

/// Undo labels used by the editing operations.
pub mod labels {
    pub const DELETE_SELECTION: &str = "Delete Selection";
    pub const APPLY_GENERATOR: &str = "Apply Generator";
    pub const TOGGLE_GENERATOR: &str = "Toggle Generator";
    pub const RESET_MATERIALS: &str = "Reset Materials";
    pub const SNAP_TO_GRID: &str = "Snap To Grid";
    pub const ADD_SHAPE: &str = "Add Shape";
    pub const PAINT_MATERIAL: &str = "Paint Material";
}

// =============================================================================
// GRID PROJECTION
// =============================================================================

/// Maps between grid space (model units) and screen space (pixels).
pub trait GridProjection {
    fn grid_point_to_screen(&self, point: DVec2) -> DVec2;

    fn screen_point_to_grid(&self, point: DVec2) -> DVec2;

    /// Converts a horizontal screen distance into grid units.
    fn screen_distance_to_grid(&self, distance: f64) -> f64 {
        let origin = self.screen_point_to_grid(DVec2::ZERO);
        self.screen_point_to_grid(DVec2::new(distance, 0.0))
            .distance(origin)
    }
}

/// Uniform scale plus offset: `screen = grid * scale + offset`.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use shape_model::{GridProjection, GridTransform};
///
/// let view = GridTransform::new(DVec2::new(100.0, 50.0), 10.0);
/// assert_eq!(view.grid_point_to_screen(DVec2::ONE), DVec2::new(110.0, 60.0));
/// assert_eq!(view.screen_distance_to_grid(60.0), 6.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridTransform {
    /// Screen position of the grid origin.
    pub offset: DVec2,
    /// Pixels per grid unit.
    pub scale: f64,
}

impl GridTransform {
    pub fn new(offset: DVec2, scale: f64) -> Self {
        Self { offset, scale }
    }
}

impl Default for GridTransform {
    fn default() -> Self {
        Self::new(DVec2::ZERO, 1.0)
    }
}

impl GridProjection for GridTransform {
    fn grid_point_to_screen(&self, point: DVec2) -> DVec2 {
        point * self.scale + self.offset
    }

    fn screen_point_to_grid(&self, point: DVec2) -> DVec2 {
        (point - self.offset) / self.scale
    }
}
