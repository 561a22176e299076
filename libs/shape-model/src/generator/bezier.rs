//! # Bezier Generator
//!
//! Cubic bezier from the segment position through two control pivots to the
//! successor's position.

use super::GeneratorParameter;
use crate::error::{ModelError, ModelResult};
use config::constants::{DEFAULT_BEZIER_DETAIL, MAX_GENERATOR_DETAIL};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Cubic bezier edge.
///
/// Pivots are absolute grid positions. A `detail` of `n` samples the curve
/// at `t = i / n` for `i in 1..n`, giving `n - 1` intermediate points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BezierGenerator {
    pub pivot1: DVec2,
    pub pivot2: DVec2,
    pub detail: u32,
}

impl BezierGenerator {
    /// Places the pivots at one and two thirds of the edge.
    pub fn new(from: DVec2, to: DVec2) -> Self {
        Self {
            pivot1: from.lerp(to, 1.0 / 3.0),
            pivot2: from.lerp(to, 2.0 / 3.0),
            detail: DEFAULT_BEZIER_DETAIL,
        }
    }

    pub(super) fn point_count(&self) -> usize {
        self.detail.saturating_sub(1) as usize
    }

    pub(super) fn point_at(&self, from: DVec2, to: DVec2, index: usize) -> DVec2 {
        let t = (index + 1) as f64 / self.detail as f64;
        cubic_bezier(from, self.pivot1, self.pivot2, to, t)
    }

    pub(super) fn parameters(&self) -> Vec<GeneratorParameter> {
        vec![GeneratorParameter::integer(
            "detail",
            self.detail,
            1,
            MAX_GENERATOR_DETAIL,
        )]
    }

    pub(super) fn set(&mut self, name: &str, value: f64) -> ModelResult<()> {
        match name {
            "detail" => self.detail = value as u32,
            _ => return Err(ModelError::unknown_parameter(name)),
        }
        Ok(())
    }
}

/// Evaluates a cubic bezier at `t` in `[0, 1]`.
pub fn cubic_bezier(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2, t: f64) -> DVec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}
