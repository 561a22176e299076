//! # Config Crate
//!
//! Centralized configuration constants for the shape extrusion core.
//! All tolerances, generator defaults, limits and palette colors are defined
//! here so the model and mesh crates never scatter literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{approx_zero, SIDE_WALL_NORMAL_EPSILON, DEFAULT_EXTRUDE_DEPTH};
//!
//! // A triangle normal with a tiny z component belongs to a side wall.
//! let normal_z: f64 = 1e-7;
//! assert!(normal_z.abs() < SIDE_WALL_NORMAL_EPSILON);
//!
//! assert!(DEFAULT_EXTRUDE_DEPTH > 0.0);
//! assert!(approx_zero(0.0));
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Singletons**: Palette and defaults are plain constants, no global state
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
