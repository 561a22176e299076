//! # Generator Tests

use super::*;
use approx::assert_relative_eq;
use config::constants::{DEFAULT_BEZIER_DETAIL, DEFAULT_SINE_DETAIL};

fn edge() -> (DVec2, DVec2) {
    (DVec2::new(0.0, 0.0), DVec2::new(4.0, 0.0))
}

// =============================================================================
// LINEAR
// =============================================================================

#[test]
fn test_linear_has_no_points() {
    let (from, to) = edge();
    let g = SegmentGenerator::Linear;
    assert_eq!(g.intermediate_points(from, to).count(), 0);
    assert!(g.parameters().is_empty());
}

// =============================================================================
// BEZIER
// =============================================================================

#[test]
fn test_bezier_default_pivots_are_on_the_edge() {
    let (from, to) = edge();
    let SegmentGenerator::Bezier(g) = SegmentGenerator::new(GeneratorKind::Bezier, from, to) else {
        panic!("expected bezier");
    };
    assert_relative_eq!(g.pivot1.x, 4.0 / 3.0);
    assert_relative_eq!(g.pivot2.x, 8.0 / 3.0);
}

#[test]
fn test_bezier_point_count_follows_detail() {
    let (from, to) = edge();
    let g = SegmentGenerator::new(GeneratorKind::Bezier, from, to);
    let points: Vec<_> = g.intermediate_points(from, to).collect();
    assert_eq!(points.len(), DEFAULT_BEZIER_DETAIL as usize - 1);
    // Pivots on the line keep the curve on the line, monotonic in x
    for pair in points.windows(2) {
        assert!(pair[1].x > pair[0].x);
        assert_relative_eq!(pair[0].y, 0.0);
    }
}

#[test]
fn test_bezier_curve_bends_towards_pivots() {
    let (from, to) = edge();
    let g = SegmentGenerator::Bezier(BezierGenerator {
        pivot1: DVec2::new(0.0, 3.0),
        pivot2: DVec2::new(4.0, 3.0),
        detail: 2,
    });
    let points: Vec<_> = g.intermediate_points(from, to).collect();
    assert_eq!(points.len(), 1);
    assert_relative_eq!(points[0].x, 2.0);
    assert_relative_eq!(points[0].y, 2.25);
}

#[test]
fn test_cubic_bezier_endpoints() {
    let p0 = DVec2::new(1.0, 2.0);
    let p3 = DVec2::new(5.0, -1.0);
    assert_eq!(cubic_bezier_at(p0, p3, 0.0), p0);
    assert_eq!(cubic_bezier_at(p0, p3, 1.0), p3);
}

fn cubic_bezier_at(p0: DVec2, p3: DVec2, t: f64) -> DVec2 {
    bezier::cubic_bezier(p0, DVec2::ZERO, DVec2::ONE, p3, t)
}

// =============================================================================
// SINE
// =============================================================================

#[test]
fn test_sine_offsets_perpendicular() {
    let (from, to) = edge();
    let g = SegmentGenerator::Sine(SineGenerator {
        frequency: 1.0,
        amplitude: 1.0,
        detail: 4,
    });
    let points: Vec<_> = g.intermediate_points(from, to).collect();
    assert_eq!(points.len(), 3);
    // t = 1/4: peak on the left normal (+y for a +x edge)
    assert_relative_eq!(points[0].x, 1.0);
    assert_relative_eq!(points[0].y, 1.0);
    // t = 1/2: back on the edge
    assert_relative_eq!(points[1].y, 0.0, epsilon = 1e-12);
    assert_relative_eq!(points[2].y, -1.0);
}

#[test]
fn test_sine_zero_length_edge_is_empty() {
    let g = SegmentGenerator::new(GeneratorKind::Sine, DVec2::ONE, DVec2::ONE);
    assert_eq!(g.intermediate_points(DVec2::ONE, DVec2::ONE).len(), 0);
}

#[test]
fn test_sine_default_detail() {
    let (from, to) = edge();
    let g = SegmentGenerator::new(GeneratorKind::Sine, from, to);
    assert_eq!(
        g.intermediate_point_count(from, to),
        DEFAULT_SINE_DETAIL as usize - 1
    );
}

// =============================================================================
// REPEAT
// =============================================================================

#[test]
fn test_repeat_count_and_boundaries() {
    let (from, to) = edge();
    let g = SegmentGenerator::Repeat(RepeatGenerator {
        times: 2,
        ..RepeatGenerator::default()
    });
    let points: Vec<_> = g.intermediate_points(from, to).collect();
    assert_eq!(points.len(), 2 * 4 + 1);
    // Boundary between repetitions sits on the edge midpoint
    assert_eq!(points[4], DVec2::new(2.0, 0.0));
    // First tooth: inset by 0.75, a quarter repetition (length 2) wide and tall
    assert_eq!(points[0], DVec2::new(0.75, 0.0));
    assert_relative_eq!(points[1].x, 0.75);
    assert_relative_eq!(points[1].y, 0.5);
    assert_relative_eq!(points[2].x, 1.25);
    assert_relative_eq!(points[3].y, 0.0);
}

#[test]
fn test_repeat_empty_pattern_splits_edge() {
    let (from, to) = edge();
    let g = SegmentGenerator::Repeat(RepeatGenerator {
        times: 4,
        pattern: Vec::new(),
    });
    let xs: Vec<f64> = g.intermediate_points(from, to).map(|p| p.x).collect();
    assert_eq!(xs, vec![1.0, 2.0, 3.0]);
}

// =============================================================================
// LAZINESS & PARAMETERS
// =============================================================================

#[test]
fn test_sequence_is_restartable() {
    let (from, to) = edge();
    let g = SegmentGenerator::new(GeneratorKind::Repeat, from, to);
    let first: Vec<_> = g.intermediate_points(from, to).collect();
    let second: Vec<_> = g.intermediate_points(from, to).collect();
    assert_eq!(first, second);

    let mut partial = g.intermediate_points(from, to);
    partial.next();
    assert_eq!(partial.len(), first.len() - 1);
}

#[test]
fn test_set_parameter_validates_range() {
    let (from, to) = edge();
    let mut g = SegmentGenerator::new(GeneratorKind::Sine, from, to);
    g.set_parameter("amplitude", 2.0).unwrap();
    g.set_parameter("detail", 9.6).unwrap();
    let SegmentGenerator::Sine(sine) = &g else {
        panic!("expected sine");
    };
    assert_eq!(sine.amplitude, 2.0);
    assert_eq!(sine.detail, 10);

    let before = g.clone();
    assert!(matches!(
        g.set_parameter("frequency", -1.0),
        Err(ModelError::ParameterOutOfRange { .. })
    ));
    assert!(matches!(
        g.set_parameter("frequency", f64::NAN),
        Err(ModelError::ParameterOutOfRange { .. })
    ));
    assert!(matches!(
        g.set_parameter("times", 3.0),
        Err(ModelError::UnknownParameter { .. })
    ));
    assert_eq!(g, before);
}

#[test]
fn test_linear_rejects_parameters() {
    let mut g = SegmentGenerator::Linear;
    assert!(g.set_parameter("detail", 4.0).is_err());
}

#[test]
fn test_is_valid_detects_bad_values() {
    let (from, to) = edge();
    assert!(SegmentGenerator::new(GeneratorKind::Bezier, from, to).is_valid());
    let bad = SegmentGenerator::Sine(SineGenerator {
        amplitude: f64::INFINITY,
        ..SineGenerator::default()
    });
    assert!(!bad.is_valid());
    let bad_pattern = SegmentGenerator::Repeat(RepeatGenerator {
        times: 2,
        pattern: vec![DVec2::new(f64::NAN, 0.0)],
    });
    assert!(!bad_pattern.is_valid());
}

#[test]
fn test_kind_names() {
    let names: Vec<_> = GeneratorKind::ALL.iter().map(|k| k.to_string()).collect();
    assert_eq!(names, vec!["Linear", "Bezier", "Sine", "Repeat"]);
}
