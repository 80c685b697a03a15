#![forbid(unsafe_code)]

//! Canonical input events for the floating widget.
//!
//! Hosts translate their native pointer, touch, and hover signals into
//! [`InputEvent`] values. All events derive `Clone` and `PartialEq` for use
//! in tests and pattern matching.
//!
//! # Design Notes
//!
//! - Coordinates are viewport pixels (`clientX`/`clientY`).
//! - Touch events carry every active touch point; only the first one is read.
//! - Release events carry no position: the session ends where the last move
//!   left it.

use crate::geometry::{Point, Size};

/// Input device that produced a press/move/release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerSource {
    Mouse,
    Touch,
}

impl PointerSource {
    /// Whether moves from this source should suppress page scrolling.
    #[inline]
    #[must_use]
    pub const fn blocks_scroll(self) -> bool {
        matches!(self, Self::Touch)
    }
}

/// One active touch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Host identifier of the touch.
    pub id: u32,
    /// Touch position in viewport coordinates.
    pub point: Point,
}

impl TouchPoint {
    /// Create a touch point.
    #[must_use]
    pub const fn new(id: u32, x: f64, y: f64) -> Self {
        Self {
            id,
            point: Point::new(x, y),
        }
    }
}

/// Canonical widget input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse button pressed on the widget.
    MouseDown(Point),
    /// Mouse moved anywhere in the document.
    MouseMove(Point),
    /// Mouse button released anywhere in the document.
    MouseUp,

    /// Touch started on the widget. Empty lists are ignored.
    TouchStart(Vec<TouchPoint>),
    /// Touch moved anywhere in the document.
    TouchMove(Vec<TouchPoint>),
    /// Touch ended anywhere in the document.
    TouchEnd,

    /// Pointer entered the widget.
    HoverEnter,
    /// Pointer left the widget.
    HoverExit,

    /// Click synthesized by the host after a press/release pair.
    Click,

    /// Viewport was resized.
    Resize(Size),
    /// Widget was measured after layout.
    Measure(Size),

    /// The modal was dismissed by the user.
    DismissModal,
    /// The page location changed (used for the modal title).
    Navigate(String),
}

/// Press, move, or release reduced to source and position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    Press(PointerSource, Point),
    Move(PointerSource, Point),
    Release(PointerSource),
}

impl InputEvent {
    /// Reduce a mouse or touch event to a [`PointerAction`].
    ///
    /// Returns `None` for non-pointer events and for touch events without an
    /// active touch point.
    #[must_use]
    pub fn pointer_action(&self) -> Option<PointerAction> {
        match self {
            Self::MouseDown(p) => Some(PointerAction::Press(PointerSource::Mouse, *p)),
            Self::MouseMove(p) => Some(PointerAction::Move(PointerSource::Mouse, *p)),
            Self::MouseUp => Some(PointerAction::Release(PointerSource::Mouse)),
            Self::TouchStart(touches) => first_touch(touches)
                .map(|p| PointerAction::Press(PointerSource::Touch, p)),
            Self::TouchMove(touches) => first_touch(touches)
                .map(|p| PointerAction::Move(PointerSource::Touch, p)),
            Self::TouchEnd => Some(PointerAction::Release(PointerSource::Touch)),
            _ => None,
        }
    }

    /// Short lowercase name, used in log fields.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MouseDown(_) => "mousedown",
            Self::MouseMove(_) => "mousemove",
            Self::MouseUp => "mouseup",
            Self::TouchStart(_) => "touchstart",
            Self::TouchMove(_) => "touchmove",
            Self::TouchEnd => "touchend",
            Self::HoverEnter => "mouseenter",
            Self::HoverExit => "mouseleave",
            Self::Click => "click",
            Self::Resize(_) => "resize",
            Self::Measure(_) => "measure",
            Self::DismissModal => "dismiss",
            Self::Navigate(_) => "navigate",
        }
    }
}

fn first_touch(touches: &[TouchPoint]) -> Option<Point> {
    touches.first().map(|t| t.point)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_events_map_to_actions() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(
            InputEvent::MouseDown(p).pointer_action(),
            Some(PointerAction::Press(PointerSource::Mouse, p))
        );
        assert_eq!(
            InputEvent::MouseUp.pointer_action(),
            Some(PointerAction::Release(PointerSource::Mouse))
        );
    }

    #[test]
    fn touch_reads_first_point_only() {
        let ev = InputEvent::TouchMove(vec![
            TouchPoint::new(7, 10.0, 20.0),
            TouchPoint::new(8, 500.0, 500.0),
        ]);
        assert_eq!(
            ev.pointer_action(),
            Some(PointerAction::Move(PointerSource::Touch, Point::new(10.0, 20.0)))
        );
    }

    #[test]
    fn empty_touch_list_is_ignored() {
        assert_eq!(InputEvent::TouchStart(Vec::new()).pointer_action(), None);
        assert_eq!(InputEvent::TouchMove(Vec::new()).pointer_action(), None);
    }

    #[test]
    fn non_pointer_events_have_no_action() {
        assert_eq!(InputEvent::Click.pointer_action(), None);
        assert_eq!(InputEvent::HoverEnter.pointer_action(), None);
    }

    #[test]
    fn only_touch_blocks_scroll() {
        assert!(PointerSource::Touch.blocks_scroll());
        assert!(!PointerSource::Mouse.blocks_scroll());
    }
}
