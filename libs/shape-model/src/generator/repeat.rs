//! # Repeat Generator
//!
//! Repeats a small pattern `times` along the edge.
//!
//! Pattern points live in a repetition-local frame: `x` is the position
//! along one repetition (`0..=1`), `y` the perpendicular offset as a
//! fraction of the repetition length. Between two repetitions the generator
//! emits the boundary point on the edge itself, so `times` repetitions of a
//! pattern with `k` points yield `times * k + times - 1` points.

use super::{edge_normal, GeneratorParameter};
use crate::error::{ModelError, ModelResult};
use config::constants::{DEFAULT_REPEAT_TIMES, MAX_GENERATOR_DETAIL};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Pattern-repeating edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatGenerator {
    pub times: u32,
    pub pattern: Vec<DVec2>,
}

impl Default for RepeatGenerator {
    /// A square tooth centred in each repetition. Its inset from the
    /// repetition ends exceeds its height, so teeth of neighbouring edges
    /// meeting at a right-angle corner stay apart.
    fn default() -> Self {
        Self {
            times: DEFAULT_REPEAT_TIMES,
            pattern: vec![
                DVec2::new(0.375, 0.0),
                DVec2::new(0.375, 0.25),
                DVec2::new(0.625, 0.25),
                DVec2::new(0.625, 0.0),
            ],
        }
    }
}

impl RepeatGenerator {
    pub(super) fn point_count(&self, from: DVec2, to: DVec2) -> usize {
        if self.times == 0 || edge_normal(from, to).is_none() {
            return 0;
        }
        let times = self.times as usize;
        times * self.pattern.len() + times - 1
    }

    pub(super) fn point_at(&self, from: DVec2, to: DVec2, index: usize) -> DVec2 {
        let times = self.times as f64;
        let stride = self.pattern.len() + 1;
        let repetition = (index / stride) as f64;
        let within = index % stride;
        match self.pattern.get(within) {
            Some(local) => {
                let t = (repetition + local.x) / times;
                let normal = edge_normal(from, to).unwrap_or(DVec2::ZERO);
                let repetition_length = from.distance(to) / times;
                from.lerp(to, t) + normal * (local.y * repetition_length)
            }
            None => from.lerp(to, (repetition + 1.0) / times),
        }
    }

    pub(super) fn parameters(&self) -> Vec<GeneratorParameter> {
        vec![GeneratorParameter::integer(
            "times",
            self.times,
            1,
            MAX_GENERATOR_DETAIL,
        )]
    }

    pub(super) fn set(&mut self, name: &str, value: f64) -> ModelResult<()> {
        match name {
            "times" => self.times = value as u32,
            _ => return Err(ModelError::unknown_parameter(name)),
        }
        Ok(())
    }
}
