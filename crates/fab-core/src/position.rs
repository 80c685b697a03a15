#![forbid(unsafe_code)]

//! Position tracker: the widget's on-screen origin.
//!
//! The tracker is the only owner of the widget position. Every write goes
//! through [`clamp_with_size`], so the stored point always satisfies the
//! viewport invariant computed at the moment of the write.
//!
//! # Failure Modes
//!
//! - Unmeasured element: falls back to the configured default extent.
//! - Viewport resize: the new viewport is recorded but the current position
//!   is **not** re-clamped. A widget parked at the right edge can end up
//!   partly off-screen after the window shrinks, until the next drag.

use crate::geometry::{Bounds, Point, Size, clamp_with_size, effective_size};

/// Owns the widget origin and the inputs needed to clamp it.
#[derive(Debug, Clone)]
pub struct PositionTracker {
    position: Point,
    viewport: Size,
    measured: Option<Size>,
    margin: f64,
    default_extent: f64,
}

impl PositionTracker {
    /// Create a tracker and place the widget at `initial` (clamped).
    #[must_use]
    pub fn new(initial: Point, viewport: Size, margin: f64, default_extent: f64) -> Self {
        let mut tracker = Self {
            position: Point::default(),
            viewport,
            measured: None,
            margin,
            default_extent,
        };
        tracker.place(initial);
        tracker
    }

    /// Move the widget to `raw`, clamped to the current viewport.
    pub fn place(&mut self, raw: Point) -> Point {
        self.position = clamp_with_size(raw, self.element_size(), self.viewport, self.margin);
        self.position
    }

    /// Current widget origin.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Record the rendered size of the widget.
    ///
    /// Degenerate sizes are stored but ignored by clamping.
    pub fn measure(&mut self, size: Size) {
        self.measured = Some(size);
    }

    /// Record a new viewport size without moving the widget.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Last known viewport size.
    #[inline]
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }

    /// Element size used for clamping (measured or default).
    #[must_use]
    pub fn element_size(&self) -> Size {
        effective_size(self.measured, self.default_extent)
    }

    /// Admissible origin range for the current inputs.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::for_element(self.element_size(), self.viewport, self.margin)
    }

    /// Margin kept from each viewport edge.
    #[inline]
    #[must_use]
    pub const fn margin(&self) -> f64 {
        self.margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{DEFAULT_ELEMENT_EXTENT, DEFAULT_MARGIN};

    fn tracker() -> PositionTracker {
        PositionTracker::new(
            Point::new(100.0, 100.0),
            Size::new(1024.0, 768.0),
            DEFAULT_MARGIN,
            DEFAULT_ELEMENT_EXTENT,
        )
    }

    #[test]
    fn initial_position_is_clamped() {
        let t = PositionTracker::new(
            Point::new(2000.0, -5.0),
            Size::new(1024.0, 768.0),
            DEFAULT_MARGIN,
            DEFAULT_ELEMENT_EXTENT,
        );
        assert_eq!(t.position(), Point::new(1024.0 - 88.0 - 16.0, 16.0));
    }

    #[test]
    fn place_clamps_and_stores() {
        let mut t = tracker();
        let p = t.place(Point::new(-10.0, 400.0));
        assert_eq!(p, Point::new(16.0, 400.0));
        assert_eq!(t.position(), p);
    }

    #[test]
    fn measured_size_changes_bounds() {
        let mut t = tracker();
        t.measure(Size::new(105.0, 105.0));
        assert_eq!(t.element_size(), Size::new(105.0, 105.0));
        assert_eq!(t.bounds().max, Point::new(1024.0 - 105.0 - 16.0, 768.0 - 105.0 - 16.0));
    }

    #[test]
    fn resize_does_not_reclamp() {
        let mut t = tracker();
        t.place(Point::new(900.0, 600.0));
        let before = t.position();
        t.set_viewport(Size::new(400.0, 300.0));
        assert_eq!(t.position(), before);
        assert!(!t.bounds().contains(before));
        // The next write honours the new viewport.
        let after = t.place(before);
        assert_eq!(after, Point::new(400.0 - 88.0 - 16.0, 300.0 - 88.0 - 16.0));
    }
}
