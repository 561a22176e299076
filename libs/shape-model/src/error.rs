//! # Model Errors
//!
//! Error types for shape and generator editing operations.

use thiserror::Error;

use crate::id::{SegmentId, ShapeId};

/// Errors that can occur while editing the shape model.
///
/// Malformed topology is never an error here: it is repaired or pruned by
/// [`Project::validate`](crate::Project::validate). These variants cover
/// caller mistakes only.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Segment id not present in the shape
    #[error("Unknown segment {segment} in shape {shape}")]
    UnknownSegment { shape: ShapeId, segment: SegmentId },

    /// Segment has no valid successor in its ring
    #[error("Broken ring at segment {0}")]
    BrokenRing(SegmentId),

    /// Generator has no parameter with the given name
    #[error("Unknown generator parameter: {name}")]
    UnknownParameter { name: String },

    /// Generator parameter outside its accepted range
    #[error("Parameter {name} = {value} outside [{min}, {max}]")]
    ParameterOutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl ModelError {
    /// Creates an unknown parameter error.
    pub fn unknown_parameter(name: impl Into<String>) -> Self {
        Self::UnknownParameter { name: name.into() }
    }

    /// Creates a parameter out of range error.
    pub fn out_of_range(name: impl Into<String>, value: f64, min: f64, max: f64) -> Self {
        Self::ParameterOutOfRange {
            name: name.into(),
            value,
            min,
            max,
        }
    }
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
