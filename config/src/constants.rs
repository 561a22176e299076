//! # Configuration Constants
//!
//! Centralized constants for the shape extrusion core. Geometry tolerances,
//! generator defaults, safety limits and the material palette live here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Extrusion**: Default depth
//! - **Generators**: Default parameters for edge generators
//! - **Limits**: Maximum values for safety bounds
//! - **Colors**: Material palette

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for general floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Minimum absolute area for a polygon or triangle to count as non-degenerate.
///
/// Rings and triangles below this area produce no output geometry.
pub const AREA_EPSILON: f64 = 1e-9;

/// Tolerance on `|normal.z|` below which a mesh triangle is a side wall.
///
/// Triangles whose unit normal has a z component within this tolerance of
/// zero stand perpendicular to the cap planes.
///
/// # Example
///
/// ```rust
/// use config::constants::SIDE_WALL_NORMAL_EPSILON;
///
/// let is_side_wall = |normal_z: f64| normal_z.abs() < SIDE_WALL_NORMAL_EPSILON;
/// assert!(is_side_wall(0.0));
/// assert!(!is_side_wall(-1.0));
/// ```
pub const SIDE_WALL_NORMAL_EPSILON: f64 = 1e-5;

/// Distance tolerance for collinear-overlap tests between a flattened side
/// wall edge and a segment's expanded edge.
pub const EDGE_MATCH_EPSILON: f64 = 1.403269e-4;

/// Tolerance for ray/triangle intersection determinants and distances.
pub const RAY_EPSILON: f64 = 1e-9;

// =============================================================================
// EXTRUSION CONSTANTS
// =============================================================================

/// Default extrusion depth along +z for the generated mesh.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_EXTRUDE_DEPTH;
///
/// let depth: Option<f64> = None;
/// assert_eq!(depth.unwrap_or(DEFAULT_EXTRUDE_DEPTH), 0.5);
/// ```
pub const DEFAULT_EXTRUDE_DEPTH: f64 = 0.5;

// =============================================================================
// GENERATOR CONSTANTS
// =============================================================================

/// Default number of curve subdivisions of a bezier generator.
///
/// A detail of `n` yields `n - 1` intermediate points.
pub const DEFAULT_BEZIER_DETAIL: u32 = 8;

/// Default number of subdivisions of a sine generator.
pub const DEFAULT_SINE_DETAIL: u32 = 64;

/// Default number of full sine periods along the edge.
pub const DEFAULT_SINE_FREQUENCY: f64 = 1.0;

/// Default perpendicular amplitude of a sine generator in grid units.
pub const DEFAULT_SINE_AMPLITUDE: f64 = 0.25;

/// Default number of pattern repetitions of a repeat generator.
pub const DEFAULT_REPEAT_TIMES: u32 = 4;

/// Maximum subdivision or repetition count accepted by any generator.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_GENERATOR_DETAIL;
///
/// let requested = 100_000_u32;
/// assert_eq!(requested.min(MAX_GENERATOR_DETAIL), MAX_GENERATOR_DETAIL);
/// ```
pub const MAX_GENERATOR_DETAIL: u32 = 512;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Default maximum number of vertices in a generated mesh.
pub const MAX_VERTICES: usize = 10_000_000;

/// Default maximum number of triangles in a generated mesh.
pub const MAX_TRIANGLES: usize = 10_000_000;

// =============================================================================
// COLOR CONSTANTS
// =============================================================================

/// Default color when no material is resolved (white).
///
/// RGBA values in range [0.0, 1.0].
pub const DEFAULT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Number of material slots a brush can paint with.
pub const MATERIAL_COUNT: usize = 8;

/// Visualization color for each material slot.
///
/// Slot 0 is the default material and shows white.
pub const MATERIAL_COLORS: [[f32; 4]; MATERIAL_COUNT] = [
    [1.0, 1.0, 1.0, 1.0],
    [0.0, 0.0, 1.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [1.0, 0.0, 0.0, 1.0],
    [0.0, 1.0, 1.0, 1.0],
    [1.0, 1.0, 0.0, 1.0],
    [1.0, 0.0, 1.0, 1.0],
    [1.0, 165.0 / 255.0, 0.0, 1.0],
];

// =============================================================================
// EDITOR CONFIG
// =============================================================================

/// Immutable snapshot of the tunable settings used by a viewport rebuild.
///
/// # Examples
/// ```
/// use config::constants::EditorConfig;
/// let config = EditorConfig::default();
/// assert!(config.extrude_depth > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    /// Extrusion depth of the generated mesh.
    pub extrude_depth: f64,
    /// Side wall classification tolerance on `|normal.z|`.
    pub side_wall_epsilon: f64,
    /// Collinear overlap tolerance for side wall matching.
    pub edge_match_epsilon: f64,
    /// Largest mesh a rebuild may produce.
    pub max_vertices: usize,
    pub max_triangles: usize,
}

impl EditorConfig {
    /// Builds a configuration, rejecting non-positive or non-finite values.
    ///
    /// # Examples
    /// ```
    /// use config::constants::EditorConfig;
    /// let cfg = EditorConfig::new(2.0, 1e-5, 1e-4).expect("valid config");
    /// assert_eq!(cfg.extrude_depth, 2.0);
    /// assert!(EditorConfig::new(0.0, 1e-5, 1e-4).is_err());
    /// ```
    pub fn new(
        extrude_depth: f64,
        side_wall_epsilon: f64,
        edge_match_epsilon: f64,
    ) -> Result<Self, ConfigError> {
        if !(extrude_depth.is_finite() && extrude_depth > 0.0) {
            return Err(ConfigError::InvalidDepth(extrude_depth));
        }
        for tolerance in [side_wall_epsilon, edge_match_epsilon] {
            if !(tolerance.is_finite() && tolerance > 0.0) {
                return Err(ConfigError::InvalidTolerance(tolerance));
            }
        }
        Ok(Self {
            extrude_depth,
            side_wall_epsilon,
            edge_match_epsilon,
            max_vertices: MAX_VERTICES,
            max_triangles: MAX_TRIANGLES,
        })
    }

    /// Same settings with different mesh size limits.
    pub fn with_limits(self, max_vertices: usize, max_triangles: usize) -> Self {
        Self {
            max_vertices,
            max_triangles,
            ..self
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            extrude_depth: DEFAULT_EXTRUDE_DEPTH,
            side_wall_epsilon: SIDE_WALL_NORMAL_EPSILON,
            edge_match_epsilon: EDGE_MATCH_EPSILON,
            max_vertices: MAX_VERTICES,
            max_triangles: MAX_TRIANGLES,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the extrusion depth is zero, negative or not finite.
    InvalidDepth(f64),
    /// Raised when a tolerance is zero, negative or not finite.
    InvalidTolerance(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDepth(value) => {
                write!(f, "extrude depth must be positive: {value}")
            }
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Returns the visualization color of a material slot.
///
/// Out-of-range indices fall back to [`DEFAULT_COLOR`].
///
/// # Example
///
/// ```rust
/// use config::constants::{material_color, DEFAULT_COLOR, MATERIAL_COLORS};
///
/// assert_eq!(material_color(1), MATERIAL_COLORS[1]);
/// assert_eq!(material_color(200), DEFAULT_COLOR);
/// ```
#[inline]
pub fn material_color(material: u8) -> [f32; 4] {
    MATERIAL_COLORS
        .get(material as usize)
        .copied()
        .unwrap_or(DEFAULT_COLOR)
}

/// True when `value` is within [`EPSILON`] of zero.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
