//! Geometric and numeric helpers used every frame.
//!
//! Everything here is pure and allocation-free: the update step calls these
//! once per particle per frame, and interactors use them for hit tests.
//!
//! Screen-space convention: `y` grows downward, so a bound's `top` is the
//! smaller `y` value.
//!
//! # Example
//!
//! ```
//! use flurry::utils::{calculate_bounds, are_bounds_inside, Dimension};
//! use flurry::Vec2;
//!
//! let viewport = Dimension::new(1920.0, 1080.0);
//! let bounds = calculate_bounds(Vec2::new(-2.0, 50.0), 1.0);
//! assert!(!are_bounds_inside(&bounds, viewport));
//! ```

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Axis-aligned box around a point, computed per check and never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

/// Viewport size, the frame of reference for every inside/outside test.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub width: f32,
    pub height: f32,
}

impl Dimension {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Center of the viewport.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// A value that may be given either once or as a list.
///
/// Deserializes from both `"circle"` and `["circle", "square"]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SingleOrMultiple<T> {
    Single(T),
    Multiple(Vec<T>),
}

impl<T> SingleOrMultiple<T> {
    /// Borrow the contents as a slice, whatever the shape.
    pub fn as_slice(&self) -> &[T] {
        match self {
            SingleOrMultiple::Single(value) => std::slice::from_ref(value),
            SingleOrMultiple::Multiple(values) => values,
        }
    }
}

impl<T> From<Vec<T>> for SingleOrMultiple<T> {
    fn from(values: Vec<T>) -> Self {
        SingleOrMultiple::Multiple(values)
    }
}

/// Restrict `value` to `[min, max]`.
///
/// Unlike [`f32::clamp`] this never panics: with an inverted range
/// (`min > max`) the result is `max`.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// True if `value` equals the scalar, or any element of the list.
#[inline]
pub fn is_in_array<T: PartialEq>(value: &T, array: &SingleOrMultiple<T>) -> bool {
    array.as_slice().iter().any(|item| item == value)
}

/// Weighted average of two components.
///
/// Requires `weight1 + weight2 != 0`; a zero weight sum yields NaN.
#[inline]
pub fn mix(comp1: f32, comp2: f32, weight1: f32, weight2: f32) -> f32 {
    (comp1 * weight1 + comp2 * weight2) / (weight1 + weight2)
}

/// Uniform pseudo-random value in `[min, max]`, using the thread RNG.
pub fn random_in_range(min: f32, max: f32) -> f32 {
    random_in_range_with(&mut rand::thread_rng(), min, max)
}

/// Uniform pseudo-random value in `[min, max]` drawn from `rng`.
///
/// Accepts `min == max` and inverted ranges without panicking.
#[inline]
pub fn random_in_range_with<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.gen::<f32>() * (max - min)
}

/// Offset from `b` to `a` together with its length.
#[inline]
pub fn get_distances(a: Vec2, b: Vec2) -> (Vec2, f32) {
    let delta = a - b;
    (delta, delta.length())
}

/// Euclidean distance between two points.
#[inline]
pub fn get_distance(a: Vec2, b: Vec2) -> f32 {
    get_distances(a, b).1
}

/// Bounds of a circle of `radius` centered on `point`.
#[inline]
pub fn calculate_bounds(point: Vec2, radius: f32) -> Bounds {
    Bounds {
        top: point.y - radius,
        right: point.x + radius,
        bottom: point.y + radius,
        left: point.x - radius,
    }
}

/// True if `bounds` overlap the viewport by any amount, edges included.
#[inline]
pub fn are_bounds_inside(bounds: &Bounds, dimension: Dimension) -> bool {
    !(bounds.right < 0.0
        || bounds.left > dimension.width
        || bounds.bottom < 0.0
        || bounds.top > dimension.height)
}

/// True if a circle of `radius` at `point` is inside the viewport.
///
/// A zero radius is a strict interior test: a point lying exactly on an
/// edge is outside. Any positive radius turns it into an overlap test, so
/// the same edge point counts as inside. Hit testing relies on both.
#[inline]
pub fn is_point_inside(point: Vec2, dimension: Dimension, radius: f32) -> bool {
    if radius > 0.0 {
        are_bounds_inside(&calculate_bounds(point, radius), dimension)
    } else {
        point.x > 0.0 && point.x < dimension.width && point.y > 0.0 && point.y < dimension.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_clamp_inverted_range_returns_max() {
        assert_eq!(clamp(5.0, 10.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 10.0, 1.0), 1.0);
    }

    #[test]
    fn test_mix_zero_weights_is_nan() {
        assert!(mix(5.0, 10.0, 0.0, 0.0).is_nan());
    }

    #[test]
    fn test_single_or_multiple_slice() {
        let single = SingleOrMultiple::Single(3);
        let multiple = SingleOrMultiple::Multiple(vec![1, 2]);
        assert_eq!(single.as_slice(), &[3]);
        assert_eq!(multiple.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_single_or_multiple_deserialize() {
        let single: SingleOrMultiple<String> = serde_json::from_str("\"circle\"").unwrap();
        let multiple: SingleOrMultiple<String> =
            serde_json::from_str("[\"circle\", \"square\"]").unwrap();
        assert_eq!(single, SingleOrMultiple::Single("circle".to_string()));
        assert_eq!(multiple.as_slice().len(), 2);
    }

    #[test]
    fn test_random_in_range_degenerate() {
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(random_in_range_with(&mut rng, 4.0, 4.0), 4.0);

        // Inverted range still lands between the two ends
        let v = random_in_range_with(&mut rng, 10.0, 1.0);
        assert!((1.0..=10.0).contains(&v));
    }

    #[test]
    fn test_get_distances_direction() {
        let (delta, dist) = get_distances(Vec2::new(3.0, 4.0), Vec2::ZERO);
        assert_eq!(delta, Vec2::new(3.0, 4.0));
        assert!((dist - 5.0).abs() < 1e-6);
    }
}
