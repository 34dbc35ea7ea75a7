//! Integration tests for the geometric utilities.

use flurry::utils::*;
use flurry::Vec2;
use proptest::prelude::*;

const EPS: f32 = 1e-5;

fn screen() -> Dimension {
    Dimension::new(1920.0, 1080.0)
}

fn bounds(top: f32, right: f32, bottom: f32, left: f32) -> Bounds {
    Bounds { top, right, bottom, left }
}

// ============================================================================
// clamp
// ============================================================================

#[test]
fn test_clamp_below_min() {
    assert_eq!(clamp(-5.0, 1.0, 10.0), 1.0);
}

#[test]
fn test_clamp_at_min() {
    assert_eq!(clamp(1.0, 1.0, 10.0), 1.0);
}

#[test]
fn test_clamp_between() {
    assert_eq!(clamp(5.0, 1.0, 10.0), 5.0);
}

#[test]
fn test_clamp_at_max() {
    assert_eq!(clamp(10.0, 1.0, 10.0), 10.0);
}

#[test]
fn test_clamp_above_max() {
    assert_eq!(clamp(15.0, 1.0, 10.0), 10.0);
}

#[test]
fn test_clamp_inverted_range() {
    assert_eq!(clamp(5.0, 10.0, 1.0), 1.0);
}

// ============================================================================
// isInArray
// ============================================================================

#[test]
fn test_is_in_array_numeric() {
    use std::f32::consts::{E, LN_2, PI, SQRT_2};
    let numbers = SingleOrMultiple::Multiple(vec![1.0, 2.0, 3.0, PI, E]);

    assert!(is_in_array(&E, &numbers));
    assert!(!is_in_array(&SQRT_2, &numbers));
    assert!(is_in_array(&LN_2, &SingleOrMultiple::Single(LN_2)));
    assert!(!is_in_array(&LN_2, &SingleOrMultiple::Single(std::f32::consts::LN_10)));
}

#[test]
fn test_is_in_array_strings() {
    let words = SingleOrMultiple::Multiple(vec!["lorem".to_string(), "ipsum".to_string(), "dolor".to_string()]);

    assert!(is_in_array(&"lorem".to_string(), &words));
    assert!(!is_in_array(&"sit".to_string(), &words));
    assert!(is_in_array(&"lorem".to_string(), &SingleOrMultiple::Single("lorem".to_string())));
    assert!(!is_in_array(&"lorem".to_string(), &SingleOrMultiple::Single("ipsum".to_string())));
}

// ============================================================================
// mix
// ============================================================================

#[test]
fn test_mix_identical_weights_is_mean() {
    for w in [0.1, 0.5, 3.0] {
        assert!((mix(5.0, 10.0, w, w) - 7.5).abs() < EPS);
    }
}

#[test]
fn test_mix_single_weight() {
    assert!((mix(5.0, 10.0, 0.4, 0.0) - 5.0).abs() < EPS);
    assert!((mix(5.0, 10.0, 0.0, 0.4) - 10.0).abs() < EPS);
}

#[test]
fn test_mix_weighted_average() {
    assert!((mix(6.0, 9.0, 2.0, 1.0) - 7.0).abs() < EPS);
    assert!((mix(-6.0, -9.0, 2.0, 1.0) + 7.0).abs() < EPS);
}

#[test]
fn test_mix_zero_weights() {
    assert!(mix(5.0, 10.0, 0.0, 0.0).is_nan());
}

// ============================================================================
// distances and bounds
// ============================================================================

#[test]
fn test_distance_cases() {
    let p = Vec2::new(1.0, 1.0);
    assert!(get_distance(p, p).abs() < EPS);
    assert!((get_distance(p, Vec2::new(2.0, 2.0)) - std::f32::consts::SQRT_2).abs() < EPS);
    assert!((get_distance(p, Vec2::new(-1.0, 1.0)) - 2.0).abs() < EPS);
    assert!((get_distance(p, Vec2::new(-1.0, -1.0)) - 2.0 * std::f32::consts::SQRT_2).abs() < EPS);
    assert_eq!(get_distance(p, Vec2::new(-1.0, -1.0)), get_distance(Vec2::new(-1.0, -1.0), p));
}

#[test]
fn test_calculate_bounds() {
    assert_eq!(calculate_bounds(Vec2::ZERO, 1.0), bounds(-1.0, 1.0, 1.0, -1.0));
}

#[test]
fn test_bounds_inside_screen() {
    let d = screen();
    assert!(are_bounds_inside(&bounds(0.0, d.width, d.height, 0.0), d));
    assert!(are_bounds_inside(&bounds(100.0, 200.0, 200.0, 100.0), d));
}

#[test]
fn test_bounds_overlapping_edges() {
    let d = screen();
    assert!(are_bounds_inside(&bounds(-1.0, 101.0, 1.0, 100.0), d));
    assert!(are_bounds_inside(&bounds(d.height - 1.0, 101.0, d.height + 1.0, 100.0), d));
    assert!(are_bounds_inside(&bounds(100.0, 1.0, 101.0, -1.0), d));
    assert!(are_bounds_inside(&bounds(100.0, d.width + 1.0, 101.0, d.width - 1.0), d));
}

#[test]
fn test_bounds_outside_screen() {
    let d = screen();
    assert!(!are_bounds_inside(&bounds(-2.0, 101.0, -1.0, 100.0), d));
    assert!(!are_bounds_inside(&bounds(d.height + 1.0, 101.0, d.height + 2.0, 100.0), d));
    assert!(!are_bounds_inside(&bounds(100.0, -1.0, 101.0, -2.0), d));
    assert!(!are_bounds_inside(&bounds(100.0, d.width + 2.0, 101.0, d.width + 1.0), d));
}

// ============================================================================
// isPointInside
// ============================================================================

#[test]
fn test_center_point_inside() {
    let d = screen();
    let center = d.center();
    assert!(is_point_inside(center, d, 0.0));
    assert!(is_point_inside(center, d, 100.0));
    assert!(is_point_inside(center, d, 1000.0));
    assert!(is_point_inside(center, d, 10000.0));
}

#[test]
fn test_boundary_points() {
    let d = screen();
    let edges = [
        Vec2::new(d.width / 2.0, 0.0),
        Vec2::new(d.width / 2.0, d.height),
        Vec2::new(0.0, d.height / 2.0),
        Vec2::new(d.width, d.height / 2.0),
    ];

    for point in edges {
        assert!(!is_point_inside(point, d, 0.0), "{:?} without radius", point);
        assert!(is_point_inside(point, d, 0.5), "{:?} with radius", point);
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_clamp_stays_in_range(v in -1e6f32..1e6, a in -1e3f32..1e3, b in -1e3f32..1e3) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let c = clamp(v, lo, hi);
        prop_assert!(c >= lo && c <= hi);
        if v >= lo && v <= hi {
            prop_assert_eq!(c, v);
        } else if v < lo {
            prop_assert_eq!(c, lo);
        } else {
            prop_assert_eq!(c, hi);
        }
    }

    #[test]
    fn prop_distance_symmetric(ax in -1e3f32..1e3, ay in -1e3f32..1e3, bx in -1e3f32..1e3, by in -1e3f32..1e3) {
        let a = Vec2::new(ax, ay);
        let b = Vec2::new(bx, by);
        prop_assert_eq!(get_distance(a, b), get_distance(b, a));
        prop_assert!(get_distance(a, b) >= 0.0);
        prop_assert_eq!(get_distance(a, a), 0.0);
        if a != b {
            prop_assert!(get_distance(a, b) > 0.0);
        }
    }

    #[test]
    fn prop_random_in_range_within(a in -1e3f32..1e3, span in 0.0f32..1e3) {
        let v = random_in_range(a, a + span);
        prop_assert!(v >= a && v <= a + span);
    }

    #[test]
    fn prop_interior_point_inside_with_any_radius(x in 1.0f32..1919.0, y in 1.0f32..1079.0, r in 0.0f32..500.0) {
        prop_assert!(is_point_inside(Vec2::new(x, y), screen(), r));
    }
}
