//! # Sine Generator

use super::{edge_normal, GeneratorParameter};
use crate::error::{ModelError, ModelResult};
use config::constants::{
    DEFAULT_SINE_AMPLITUDE, DEFAULT_SINE_DETAIL, DEFAULT_SINE_FREQUENCY, MAX_GENERATOR_DETAIL,
};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

const MAX_FREQUENCY: f64 = 64.0;
const MAX_AMPLITUDE: f64 = 64.0;

/// Sine wave along the edge.
///
/// The point at parameter `t` is the linear interpolation of the edge,
/// offset along the edge's left normal by `amplitude * sin(2π * frequency * t)`.
/// A zero-length edge has no normal and yields no points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SineGenerator {
    pub frequency: f64,
    pub amplitude: f64,
    pub detail: u32,
}

impl Default for SineGenerator {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_SINE_FREQUENCY,
            amplitude: DEFAULT_SINE_AMPLITUDE,
            detail: DEFAULT_SINE_DETAIL,
        }
    }
}

impl SineGenerator {
    pub(super) fn point_count(&self, from: DVec2, to: DVec2) -> usize {
        if edge_normal(from, to).is_none() {
            return 0;
        }
        self.detail.saturating_sub(1) as usize
    }

    pub(super) fn point_at(&self, from: DVec2, to: DVec2, index: usize) -> DVec2 {
        let t = (index + 1) as f64 / self.detail as f64;
        let normal = edge_normal(from, to).unwrap_or(DVec2::ZERO);
        from.lerp(to, t) + normal * (self.amplitude * (TAU * self.frequency * t).sin())
    }

    pub(super) fn parameters(&self) -> Vec<GeneratorParameter> {
        vec![
            GeneratorParameter::integer("detail", self.detail, 1, MAX_GENERATOR_DETAIL),
            GeneratorParameter::real("frequency", self.frequency, 0.0, MAX_FREQUENCY),
            GeneratorParameter::real("amplitude", self.amplitude, -MAX_AMPLITUDE, MAX_AMPLITUDE),
        ]
    }

    pub(super) fn set(&mut self, name: &str, value: f64) -> ModelResult<()> {
        match name {
            "detail" => self.detail = value as u32,
            "frequency" => self.frequency = value,
            "amplitude" => self.amplitude = value,
            _ => return Err(ModelError::unknown_parameter(name)),
        }
        Ok(())
    }
}
