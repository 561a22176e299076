//! # Mesh Errors
//!
//! Error types for mesh generation and material tools.

use thiserror::Error;

/// Errors that can occur during mesh generation.
///
/// Degenerate input geometry is not an error: it produces no triangles.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Extrusion depth is zero, negative or not finite
    #[error("Invalid extrusion depth: {depth}")]
    InvalidDepth { depth: f64 },

    /// Degenerate geometry where a caller required a usable result
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// Material index outside the palette
    #[error("Invalid material: {material} (max: {max})")]
    InvalidMaterial { material: u8, max: usize },

    /// Too many vertices
    #[error("Too many vertices: {count} (max: {max})")]
    TooManyVertices { count: usize, max: usize },

    /// Too many triangles
    #[error("Too many triangles: {count} (max: {max})")]
    TooManyTriangles { count: usize, max: usize },
}

impl MeshError {
    /// Creates an invalid depth error.
    pub fn invalid_depth(depth: f64) -> Self {
        Self::InvalidDepth { depth }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }
}

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;
