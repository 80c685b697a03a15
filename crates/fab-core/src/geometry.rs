#![forbid(unsafe_code)]

//! Geometric primitives and viewport clamping.
//!
//! Coordinates are device-independent pixels with the origin at the top-left
//! of the viewport, matching browser `clientX`/`clientY`.
//!
//! # Invariants
//!
//! 1. `clamp_position` always returns finite coordinates `>= margin`.
//! 2. When the viewport can hold the element plus both margins, the result
//!    lies in `[margin, viewport - element - margin]` on each axis.
//! 3. When it cannot, the axis pins to `margin` (the lower bound wins).

use std::ops::{Add, Sub};

/// Fallback edge length used before the widget has been measured.
pub const DEFAULT_ELEMENT_EXTENT: f64 = 88.0;

/// Gap kept between the widget and every viewport edge.
pub const DEFAULT_MARGIN: f64 = 16.0;

/// A point in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Largest absolute per-axis distance to `other` (Chebyshev distance).
    #[inline]
    #[must_use]
    pub fn max_axis_distance(self, other: Self) -> f64 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width and height of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A square size.
    #[inline]
    #[must_use]
    pub const fn square(extent: f64) -> Self {
        Self::new(extent, extent)
    }

    /// True when either side is zero, negative, or not finite.
    ///
    /// A degenerate measurement is treated as "not measured yet".
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

/// Inclusive range a widget origin may occupy inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Compute the admissible origin range for `element` inside `viewport`.
    ///
    /// `max` may be smaller than `min` when the viewport is too small.
    #[must_use]
    pub fn for_element(element: Size, viewport: Size, margin: f64) -> Self {
        Self {
            min: Point::new(margin, margin),
            max: Point::new(
                viewport.width - element.width - margin,
                viewport.height - element.height - margin,
            ),
        }
    }

    /// Whether the range is non-empty on both axes.
    #[must_use]
    pub fn is_satisfiable(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    /// Whether `p` lies inside the range.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Resolve a possibly-unmeasured element size to a usable one.
#[must_use]
pub fn effective_size(element: Option<Size>, default_extent: f64) -> Size {
    match element {
        Some(size) if !size.is_degenerate() => size,
        _ => Size::square(default_extent),
    }
}

/// Clamp one axis: `max(margin, min(raw, upper))`.
///
/// The lower bound is applied last, so an inverted range yields `margin`.
/// NaN input also yields `margin`.
#[inline]
fn clamp_axis(raw: f64, margin: f64, upper: f64) -> f64 {
    let capped = if raw > upper { upper } else { raw };
    if capped >= margin { capped } else { margin }
}

/// Constrain a raw widget origin to the visible viewport minus `margin`.
///
/// `element` is the measured widget size; `None` (or a degenerate size) falls
/// back to a [`DEFAULT_ELEMENT_EXTENT`] square.
#[must_use]
pub fn clamp_position(raw: Point, element: Option<Size>, viewport: Size, margin: f64) -> Point {
    let element = effective_size(element, DEFAULT_ELEMENT_EXTENT);
    clamp_with_size(raw, element, viewport, margin)
}

/// Like [`clamp_position`] with an already resolved element size.
#[must_use]
pub fn clamp_with_size(raw: Point, element: Size, viewport: Size, margin: f64) -> Point {
    let bounds = Bounds::for_element(element, viewport, margin);
    Point::new(
        clamp_axis(raw.x, bounds.min.x, bounds.max.x),
        clamp_axis(raw.y, bounds.min.y, bounds.max.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(1280.0, 800.0);

    #[test]
    fn in_bounds_point_is_unchanged() {
        let p = Point::new(200.0, 300.0);
        assert_eq!(clamp_position(p, None, VIEWPORT, DEFAULT_MARGIN), p);
    }

    #[test]
    fn negative_point_clamps_to_margin() {
        let p = clamp_position(Point::new(-50.0, -1.0), None, VIEWPORT, DEFAULT_MARGIN);
        assert_eq!(p, Point::new(16.0, 16.0));
    }

    #[test]
    fn overflow_clamps_to_far_edge() {
        let p = clamp_position(Point::new(5000.0, 5000.0), None, VIEWPORT, DEFAULT_MARGIN);
        assert_eq!(p, Point::new(1280.0 - 88.0 - 16.0, 800.0 - 88.0 - 16.0));
    }

    #[test]
    fn measured_size_overrides_default() {
        let element = Size::new(105.0, 120.0);
        let p = clamp_position(
            Point::new(5000.0, 5000.0),
            Some(element),
            VIEWPORT,
            DEFAULT_MARGIN,
        );
        assert_eq!(p, Point::new(1280.0 - 105.0 - 16.0, 800.0 - 120.0 - 16.0));
    }

    #[test]
    fn zero_measurement_uses_default() {
        let p = clamp_position(
            Point::new(5000.0, 0.0),
            Some(Size::new(0.0, 0.0)),
            VIEWPORT,
            DEFAULT_MARGIN,
        );
        assert_eq!(p.x, 1280.0 - 88.0 - 16.0);
    }

    #[test]
    fn tiny_viewport_pins_to_margin() {
        let tiny = Size::new(60.0, 40.0);
        let p = clamp_position(Point::new(30.0, 500.0), None, tiny, DEFAULT_MARGIN);
        assert_eq!(p, Point::new(16.0, 16.0));
        assert!(!Bounds::for_element(Size::square(88.0), tiny, 16.0).is_satisfiable());
    }

    #[test]
    fn nan_clamps_to_margin() {
        let p = clamp_position(Point::new(f64::NAN, 100.0), None, VIEWPORT, DEFAULT_MARGIN);
        assert_eq!(p.x, 16.0);
        assert_eq!(p.y, 100.0);
    }

    #[test]
    fn max_axis_distance_uses_larger_axis() {
        let a = Point::new(100.0, 100.0);
        assert_eq!(a.max_axis_distance(Point::new(103.0, 97.0)), 3.0);
        assert_eq!(a.max_axis_distance(Point::new(106.0, 100.0)), 6.0);
    }

    #[test]
    fn point_arithmetic() {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a - b, Point::new(7.0, 16.0));
        assert_eq!(a + b, Point::new(13.0, 24.0));
    }
}
