#![forbid(unsafe_code)]

//! Gesture classification: tells a drag of the widget from a click on it.
//!
//! [`GestureClassifier`] consumes press, move, and release signals (mouse or
//! first touch point), moves the widget through a [`PositionTracker`] while a
//! press is active, and decides whether the click the host synthesizes after
//! a release should be honoured.
//!
//! # State Machine
//!
//! ```text
//!   Idle ──press──▶ Pressed ──move beyond threshold──▶ Dragging
//!    ▲                 │                                   │
//!    └────release──────┴──────────────release──────────────┘
//! ```
//!
//! A release starts a cool-down. Until it expires the "has dragged" flag of
//! the finished session stays set, which swallows the click the input system
//! fires right after a drag ends.
//!
//! # Invariants
//!
//! 1. `has_dragged` only goes `false → true` inside a session; it is reset by
//!    a new press or by the cool-down expiring, never by a move.
//! 2. A click is allowed iff no press is active and `has_dragged` is false.
//! 3. Each session emits exactly one `Attach` and one `Detach` command
//!    (or one `Detach` from [`teardown`](GestureClassifier::teardown)).
//! 4. At most one cool-down is armed; a new press cancels it.
//!
//! # Failure Modes
//!
//! - Move or release without a prior press: ignored (`None`).
//! - Press while a press is already active (e.g. touch then mouse): the
//!   session restarts in place; listeners are not attached twice.

use std::time::Duration;

use crate::event::PointerSource;
use crate::geometry::Point;
use crate::listener::{ListenerCommand, ListenerSet};
use crate::logging::TARGET_GESTURE;
use crate::position::PositionTracker;
use crate::timer::{TimerHandle, TimerSlot};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for gesture classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Per-axis distance (pixels) a press must travel to count as a drag
    /// (default: 5). The comparison is strict.
    pub drag_threshold: f64,
    /// Delay after release before the drag flag clears (default: 200ms).
    pub click_cooldown: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 5.0,
            click_cooldown: Duration::from_millis(200),
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Coarse classifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// No press active.
    Idle,
    /// Press active, threshold not crossed yet.
    Pressed,
    /// Press active and moved beyond the threshold.
    Dragging,
}

/// One press-to-release interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Device that started the session.
    pub source: PointerSource,
    /// Press position minus the widget origin at press time.
    pub offset: Point,
    /// Press position.
    pub start_position: Point,
}

/// Result of a press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressOutcome {
    pub session: DragSession,
    /// `Attach` for a fresh session; `None` when restarting an active one.
    pub listener: Option<ListenerCommand>,
    /// Whether a pending cool-down was cancelled.
    pub cancelled_cooldown: bool,
}

/// Result of a move during an active press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    /// Clamped widget origin after the move.
    pub position: Point,
    /// True only on the move that crossed the threshold.
    pub drag_started: bool,
    /// Host should call `preventDefault()` on the native event.
    pub prevent_default: bool,
}

/// Result of a release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleaseOutcome {
    /// Whether the finished session moved beyond the threshold.
    pub has_dragged: bool,
    /// Handle of the armed cool-down.
    pub cooldown: TimerHandle,
    pub listener: Option<ListenerCommand>,
}

// ---------------------------------------------------------------------------
// GestureClassifier
// ---------------------------------------------------------------------------

/// Stateful drag-versus-click classifier.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    config: GestureConfig,
    session: Option<DragSession>,
    has_dragged: bool,
    cooldown: TimerSlot,
    listeners: Option<ListenerSet>,
}

impl GestureClassifier {
    /// Create an idle classifier.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            session: None,
            has_dragged: false,
            cooldown: TimerSlot::new("drag-cooldown"),
            listeners: None,
        }
    }

    /// Start (or restart) a session at `point`.
    ///
    /// `element_origin` is the widget's current top-left corner.
    pub fn press(
        &mut self,
        source: PointerSource,
        point: Point,
        element_origin: Point,
        _now: Duration,
    ) -> PressOutcome {
        let cancelled_cooldown = self.cooldown.cancel();
        let session = DragSession {
            source,
            offset: point - element_origin,
            start_position: point,
        };
        let restarted = self.session.replace(session).is_some();
        self.has_dragged = false;

        let listener = if self.listeners.is_none() {
            self.listeners = Some(ListenerSet::DRAG);
            Some(ListenerCommand::Attach(ListenerSet::DRAG))
        } else {
            None
        };

        tracing::debug!(
            target: TARGET_GESTURE,
            ?source,
            x = point.x,
            y = point.y,
            restarted,
            cancelled_cooldown,
            "press"
        );

        PressOutcome {
            session,
            listener,
            cancelled_cooldown,
        }
    }

    /// Follow a move while a press is active.
    ///
    /// Returns `None` when no press is active.
    pub fn move_to(
        &mut self,
        source: PointerSource,
        point: Point,
        tracker: &mut PositionTracker,
    ) -> Option<MoveOutcome> {
        let session = self.session?;

        let mut drag_started = false;
        if !self.has_dragged
            && session.start_position.max_axis_distance(point) > self.config.drag_threshold
        {
            self.has_dragged = true;
            drag_started = true;
            tracing::debug!(
                target: TARGET_GESTURE,
                ?source,
                start_x = session.start_position.x,
                start_y = session.start_position.y,
                x = point.x,
                y = point.y,
                "drag threshold crossed"
            );
        }

        let position = tracker.place(point - session.offset);
        tracing::trace!(target: TARGET_GESTURE, x = position.x, y = position.y, "move");

        Some(MoveOutcome {
            position,
            drag_started,
            prevent_default: source.blocks_scroll(),
        })
    }

    /// End the active session and arm the cool-down.
    ///
    /// Returns `None` when no press is active.
    pub fn release(&mut self, source: PointerSource, now: Duration) -> Option<ReleaseOutcome> {
        self.session.take()?;
        let cooldown = self.cooldown.schedule(now, self.config.click_cooldown);
        let listener = self.listeners.take().map(ListenerCommand::Detach);

        tracing::debug!(
            target: TARGET_GESTURE,
            ?source,
            has_dragged = self.has_dragged,
            "release"
        );

        Some(ReleaseOutcome {
            has_dragged: self.has_dragged,
            cooldown,
            listener,
        })
    }

    /// Apply the cool-down if it is due at `now`.
    ///
    /// Returns `true` when the drag flag was cleared by this call.
    pub fn poll(&mut self, now: Duration) -> bool {
        let Some(handle) = self.cooldown.fire_due(now) else {
            return false;
        };
        // A press may have started a new session since the release; its flag
        // belongs to that session.
        if self.session.is_some() {
            tracing::trace!(
                target: TARGET_GESTURE,
                generation = handle.generation(),
                "stale cool-down ignored"
            );
            return false;
        }
        self.has_dragged = false;
        tracing::trace!(target: TARGET_GESTURE, "cool-down expired");
        true
    }

    /// Whether a click arriving now should be honoured.
    #[inline]
    #[must_use]
    pub fn click_allowed(&self) -> bool {
        self.session.is_none() && !self.has_dragged
    }

    /// Whether a press is active.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Whether the current or last session moved beyond the threshold.
    #[inline]
    #[must_use]
    pub fn has_dragged(&self) -> bool {
        self.has_dragged
    }

    /// Coarse phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        match (self.session, self.has_dragged) {
            (None, _) => GesturePhase::Idle,
            (Some(_), false) => GesturePhase::Pressed,
            (Some(_), true) => GesturePhase::Dragging,
        }
    }

    /// Active session, if any.
    #[inline]
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Deadline of the pending cool-down.
    #[inline]
    #[must_use]
    pub fn cooldown_deadline(&self) -> Option<Duration> {
        self.cooldown.deadline()
    }

    /// Listeners currently held.
    #[inline]
    #[must_use]
    pub fn listeners(&self) -> Option<ListenerSet> {
        self.listeners
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Drop all state and release held listeners.
    pub fn teardown(&mut self) -> Option<ListenerCommand> {
        self.cooldown.cancel();
        self.session = None;
        self.has_dragged = false;
        self.listeners.take().map(ListenerCommand::Detach)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
