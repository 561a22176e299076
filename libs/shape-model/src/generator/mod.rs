//! # Segment Generators
//!
//! Edge generators expand the straight edge between a segment and its
//! successor into a sequence of intermediate points.
//!
//! ## Variants
//!
//! - **Linear**: No intermediate points
//! - **Bezier**: Cubic curve through two control pivots
//! - **Sine**: Perpendicular sine wave along the edge
//! - **Repeat**: A small pattern repeated along the edge
//!
//! The sequence is lazy and restartable: [`SegmentGenerator::intermediate_points`]
//! computes every point from its index, so calling it again yields the same
//! points without caching state on the generator.

mod bezier;
mod repeat;
mod sine;

#[cfg(test)]
mod tests;

pub use bezier::BezierGenerator;
pub use repeat::RepeatGenerator;
pub use sine::SineGenerator;

use crate::error::{ModelError, ModelResult};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of a [`SegmentGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeneratorKind {
    Linear,
    Bezier,
    Sine,
    Repeat,
}

impl GeneratorKind {
    /// All kinds, in menu order.
    pub const ALL: [GeneratorKind; 4] = [
        GeneratorKind::Linear,
        GeneratorKind::Bezier,
        GeneratorKind::Sine,
        GeneratorKind::Repeat,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GeneratorKind::Linear => "Linear",
            GeneratorKind::Bezier => "Bezier",
            GeneratorKind::Sine => "Sine",
            GeneratorKind::Repeat => "Repeat",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One editable scalar of a generator, as shown in an inspector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorParameter {
    pub name: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    /// Whole numbers only; fractional input is rounded.
    pub integer: bool,
}

impl GeneratorParameter {
    pub(crate) fn real(name: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self {
            name,
            value,
            min,
            max,
            integer: false,
        }
    }

    pub(crate) fn integer(name: &'static str, value: u32, min: u32, max: u32) -> Self {
        Self {
            name,
            value: value as f64,
            min: min as f64,
            max: max as f64,
            integer: true,
        }
    }

    /// Checks `value` against this parameter's range.
    ///
    /// Returns the value to store (rounded for integer parameters).
    pub(crate) fn accept(&self, value: f64) -> ModelResult<f64> {
        let value = if self.integer { value.round() } else { value };
        if !value.is_finite() || value < self.min || value > self.max {
            return Err(ModelError::out_of_range(self.name, value, self.min, self.max));
        }
        Ok(value)
    }

    fn in_range(&self) -> bool {
        self.value.is_finite() && self.value >= self.min && self.value <= self.max
    }
}

/// Edge generator owned by a segment.
///
/// Switching variants always builds a fresh generator through
/// [`SegmentGenerator::new`]; parameters of the previous variant are dropped.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SegmentGenerator {
    #[default]
    Linear,
    Bezier(BezierGenerator),
    Sine(SineGenerator),
    Repeat(RepeatGenerator),
}

impl SegmentGenerator {
    /// Creates a generator of `kind` with default parameters for the edge
    /// `from -> to`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec2;
    /// use shape_model::{GeneratorKind, SegmentGenerator};
    ///
    /// let g = SegmentGenerator::new(GeneratorKind::Bezier, DVec2::ZERO, DVec2::new(3.0, 0.0));
    /// assert_eq!(g.kind(), GeneratorKind::Bezier);
    /// ```
    pub fn new(kind: GeneratorKind, from: DVec2, to: DVec2) -> Self {
        match kind {
            GeneratorKind::Linear => SegmentGenerator::Linear,
            GeneratorKind::Bezier => SegmentGenerator::Bezier(BezierGenerator::new(from, to)),
            GeneratorKind::Sine => SegmentGenerator::Sine(SineGenerator::default()),
            GeneratorKind::Repeat => SegmentGenerator::Repeat(RepeatGenerator::default()),
        }
    }

    pub fn kind(&self) -> GeneratorKind {
        match self {
            SegmentGenerator::Linear => GeneratorKind::Linear,
            SegmentGenerator::Bezier(_) => GeneratorKind::Bezier,
            SegmentGenerator::Sine(_) => GeneratorKind::Sine,
            SegmentGenerator::Repeat(_) => GeneratorKind::Repeat,
        }
    }

    /// Number of intermediate points produced for the edge `from -> to`.
    pub fn intermediate_point_count(&self, from: DVec2, to: DVec2) -> usize {
        match self {
            SegmentGenerator::Linear => 0,
            SegmentGenerator::Bezier(g) => g.point_count(),
            SegmentGenerator::Sine(g) => g.point_count(from, to),
            SegmentGenerator::Repeat(g) => g.point_count(from, to),
        }
    }

    /// Lazily yields the intermediate points strictly between `from` and `to`.
    ///
    /// Neither endpoint is included.
    pub fn intermediate_points(&self, from: DVec2, to: DVec2) -> IntermediatePoints<'_> {
        IntermediatePoints {
            generator: self,
            from,
            to,
            index: 0,
            count: self.intermediate_point_count(from, to),
        }
    }

    fn point_at(&self, from: DVec2, to: DVec2, index: usize) -> DVec2 {
        match self {
            SegmentGenerator::Linear => from,
            SegmentGenerator::Bezier(g) => g.point_at(from, to, index),
            SegmentGenerator::Sine(g) => g.point_at(from, to, index),
            SegmentGenerator::Repeat(g) => g.point_at(from, to, index),
        }
    }

    /// Lists the editable scalar parameters with their current values.
    pub fn parameters(&self) -> Vec<GeneratorParameter> {
        match self {
            SegmentGenerator::Linear => Vec::new(),
            SegmentGenerator::Bezier(g) => g.parameters(),
            SegmentGenerator::Sine(g) => g.parameters(),
            SegmentGenerator::Repeat(g) => g.parameters(),
        }
    }

    /// Sets one named parameter after validating it against its range.
    ///
    /// # Errors
    ///
    /// [`ModelError::UnknownParameter`] when the variant has no such
    /// parameter, [`ModelError::ParameterOutOfRange`] when the value is
    /// rejected. The generator is unchanged on error.
    pub fn set_parameter(&mut self, name: &str, value: f64) -> ModelResult<()> {
        let parameter = self
            .parameters()
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ModelError::unknown_parameter(name))?;
        let value = parameter.accept(value)?;
        match self {
            SegmentGenerator::Linear => Err(ModelError::unknown_parameter(name)),
            SegmentGenerator::Bezier(g) => g.set(name, value),
            SegmentGenerator::Sine(g) => g.set(name, value),
            SegmentGenerator::Repeat(g) => g.set(name, value),
        }
    }

    /// True when every parameter is finite and within its range.
    ///
    /// Deserialized data can violate this; validation resets such
    /// generators to Linear.
    pub fn is_valid(&self) -> bool {
        let extra = match self {
            SegmentGenerator::Bezier(g) => g.pivot1.is_finite() && g.pivot2.is_finite(),
            SegmentGenerator::Repeat(g) => g.pattern.iter().all(|p| p.is_finite()),
            _ => true,
        };
        extra && self.parameters().iter().all(GeneratorParameter::in_range)
    }
}

// =============================================================================
// ITERATOR
// =============================================================================

/// Lazy, finite iterator over a generator's intermediate points.
///
/// Each call to [`SegmentGenerator::intermediate_points`] starts a fresh pass.
#[derive(Debug, Clone)]
pub struct IntermediatePoints<'a> {
    generator: &'a SegmentGenerator,
    from: DVec2,
    to: DVec2,
    index: usize,
    count: usize,
}

impl Iterator for IntermediatePoints<'_> {
    type Item = DVec2;

    fn next(&mut self) -> Option<DVec2> {
        if self.index >= self.count {
            return None;
        }
        let point = self.generator.point_at(self.from, self.to, self.index);
        self.index += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for IntermediatePoints<'_> {}

/// Unit normal of the edge `from -> to`, `None` for a zero-length edge.
pub(crate) fn edge_normal(from: DVec2, to: DVec2) -> Option<DVec2> {
    (to - from).try_normalize().map(|dir| dir.perp())
}
