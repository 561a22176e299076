//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants
//! and helper functions.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_side_wall_epsilon_matches_classification_tolerance() {
    assert_eq!(SIDE_WALL_NORMAL_EPSILON, 1e-5);
}

#[test]
fn test_edge_match_epsilon_larger_than_epsilon() {
    assert!(
        EDGE_MATCH_EPSILON > EPSILON,
        "EDGE_MATCH_EPSILON should be looser than EPSILON"
    );
    assert!(EDGE_MATCH_EPSILON < 1e-3);
}

#[test]
fn test_area_epsilon_is_small() {
    assert!(AREA_EPSILON > 0.0);
    assert!(AREA_EPSILON < 1e-6);
}

// =============================================================================
// GENERATOR TESTS
// =============================================================================

#[test]
fn test_generator_defaults_within_limits() {
    assert!(DEFAULT_BEZIER_DETAIL >= 2);
    assert!(DEFAULT_SINE_DETAIL >= 2);
    assert!(DEFAULT_REPEAT_TIMES >= 1);
    assert!(DEFAULT_BEZIER_DETAIL <= MAX_GENERATOR_DETAIL);
    assert!(DEFAULT_SINE_DETAIL <= MAX_GENERATOR_DETAIL);
    assert!(DEFAULT_REPEAT_TIMES <= MAX_GENERATOR_DETAIL);
}

// =============================================================================
// APPROX TESTS
// =============================================================================

#[test]
fn test_approx_zero() {
    assert!(approx_zero(0.0));
    assert!(approx_zero(-EPSILON / 2.0));
    assert!(!approx_zero(EPSILON * 2.0));
    assert!(!approx_zero(-1.0));
}

// =============================================================================
// EDITOR CONFIG TESTS
// =============================================================================

#[test]
fn test_editor_config_default() {
    let config = EditorConfig::default();
    assert_eq!(config.extrude_depth, DEFAULT_EXTRUDE_DEPTH);
    assert_eq!(config.side_wall_epsilon, SIDE_WALL_NORMAL_EPSILON);
    assert_eq!(config.edge_match_epsilon, EDGE_MATCH_EPSILON);
    assert_eq!(config.max_vertices, MAX_VERTICES);
    assert_eq!(config.max_triangles, MAX_TRIANGLES);
}

#[test]
fn test_editor_config_rejects_bad_depth() {
    assert_eq!(
        EditorConfig::new(-1.0, 1e-5, 1e-4),
        Err(ConfigError::InvalidDepth(-1.0))
    );
    assert!(EditorConfig::new(f64::NAN, 1e-5, 1e-4).is_err());
}

#[test]
fn test_editor_config_rejects_bad_tolerance() {
    assert_eq!(
        EditorConfig::new(1.0, 1e-5, 0.0),
        Err(ConfigError::InvalidTolerance(0.0))
    );
}

#[test]
fn test_editor_config_with_limits() {
    let config = EditorConfig::new(2.0, 1e-5, 1e-4).unwrap().with_limits(100, 50);
    assert_eq!(config.extrude_depth, 2.0);
    assert_eq!(config.max_vertices, 100);
    assert_eq!(config.max_triangles, 50);
    assert_ne!(config, EditorConfig::new(2.0, 1e-5, 1e-4).unwrap());
}

#[test]
fn test_config_error_display() {
    let err = ConfigError::InvalidDepth(0.0);
    assert!(err.to_string().contains("depth"));
}

// =============================================================================
// LIMIT TESTS
// =============================================================================

#[test]
fn test_max_triangles_reasonable() {
    assert!(MAX_TRIANGLES >= 1_000_000);
    assert!(MAX_VERTICES >= 1_000_000);
}

// =============================================================================
// COLOR TESTS
// =============================================================================

#[test]
fn test_material_colors_valid_rgba() {
    for color in MATERIAL_COLORS.iter() {
        for component in color.iter() {
            assert!(*component >= 0.0 && *component <= 1.0);
        }
        assert_eq!(color[3], 1.0);
    }
}

#[test]
fn test_material_zero_is_default_white() {
    assert_eq!(MATERIAL_COLORS[0], DEFAULT_COLOR);
}

#[test]
fn test_material_color_out_of_range_falls_back() {
    assert_eq!(material_color(MATERIAL_COUNT as u8), DEFAULT_COLOR);
    assert_eq!(material_color(3), [1.0, 0.0, 0.0, 1.0]);
}
