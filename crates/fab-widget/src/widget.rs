#![forbid(unsafe_code)]

//! The floating assistant widget shell.
//!
//! [`FloatingAssistantWidget`] composes the position tracker, the gesture
//! classifier, and the greeting player, and owns the chat modal. Hosts feed
//! it [`InputEvent`]s with a monotonic timestamp, apply the returned
//! [`WidgetResponse`], and paint [`WidgetView`].
//!
//! # Invariants
//!
//! 1. Timers due at `now` are applied before the event at `now`, so a click
//!    after the cool-down is judged on the reset flag.
//! 2. The greeting bubble is visible only while hovering and not dragging.
//! 3. The modal opens only when the gesture classifier allows a click.
//! 4. After [`shutdown`](FloatingAssistantWidget::shutdown) every event and
//!    tick is a no-op.
//!
//! # Failure Modes
//!
//! None of the operations fail. Misclassification (drag taken for a click or
//! the reverse) is bounded by the drag threshold and the cool-down.

use std::time::Duration;

use fab_core::config::WidgetConfig;
use fab_core::event::{InputEvent, PointerAction};
use fab_core::geometry::{Point, Size};
use fab_core::gesture::{GestureClassifier, GesturePhase};
use fab_core::greeting::{BubbleSide, GreetingPlayer, RevealToken};
use fab_core::listener::ListenerCommand;
use fab_core::logging::TARGET_WIDGET;
use fab_core::position::PositionTracker;

use crate::collaborator::{ChatCollaborator, ChatProps};
use crate::modal::{ModalState, OpenOutcome};
use crate::routes::{RouteNode, resolve_title};

// ---------------------------------------------------------------------------
// Responses and view
// ---------------------------------------------------------------------------

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickDecision {
    /// The modal opened; `first` on the very first open.
    Opened { first: bool },
    /// The click followed a drag (or arrived mid-press) and was swallowed.
    Suppressed,
    /// The modal was already open.
    AlreadyOpen,
}

/// Effects the host must apply after [`FloatingAssistantWidget::handle`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WidgetResponse {
    /// Document listener acquire/release.
    pub listener: Option<ListenerCommand>,
    /// Call `preventDefault()` on the native event.
    pub prevent_default: bool,
    /// New widget origin, when the event moved the widget.
    pub moved: Option<Point>,
    /// Set for click events.
    pub click: Option<ClickDecision>,
    /// The modal was dismissed by this event.
    pub modal_closed: bool,
}

/// Cursor shown over the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Grab,
    Grabbing,
}

/// The hover greeting bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BubbleView<'a> {
    pub text: &'a str,
    pub side: BubbleSide,
    /// Whether the reveal has reached the end of the greeting.
    pub complete: bool,
}

/// The chat modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalView<'a> {
    pub open: bool,
    pub title: &'a str,
}

/// Everything a host needs to paint the widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetView<'a> {
    pub position: Point,
    pub cursor: Cursor,
    /// Render lifted (scaled up, no transition) while a press is active.
    pub lifted: bool,
    pub bubble: Option<BubbleView<'a>>,
    pub modal: ModalView<'a>,
}

// ---------------------------------------------------------------------------
// FloatingAssistantWidget
// ---------------------------------------------------------------------------

/// Draggable launcher that opens the assistant chat.
#[derive(Debug)]
pub struct FloatingAssistantWidget<C> {
    config: WidgetConfig,
    tracker: PositionTracker,
    gesture: GestureClassifier,
    greeting: GreetingPlayer,
    hover: Option<RevealToken>,
    modal: ModalState,
    chat: C,
    routes: Vec<RouteNode>,
    /// Pathname the title was resolved for.
    location: Option<String>,
    title: String,
    torn_down: bool,
}

impl<C: ChatCollaborator> FloatingAssistantWidget<C> {
    /// Create a widget in its initial bottom-right placement.
    #[must_use]
    pub fn new(config: WidgetConfig, viewport: Size, chat: C) -> Self {
        let tracker = PositionTracker::new(
            config.initial_position(viewport),
            viewport,
            config.margin,
            config.default_extent,
        );
        let title = config.fallback_title.clone();
        Self {
            gesture: GestureClassifier::new(config.gesture()),
            tracker,
            greeting: GreetingPlayer::new(),
            hover: None,
            modal: ModalState::default(),
            chat,
            routes: Vec::new(),
            location: None,
            title,
            torn_down: false,
            config,
        }
    }

    /// Use `routes` to title the modal after the current page, starting
    /// at `pathname`.
    #[must_use]
    pub fn with_routes(mut self, routes: Vec<RouteNode>, pathname: &str) -> Self {
        self.routes = routes;
        self.location = None;
        self.navigate(pathname);
        self
    }

    /// Apply due timers, then process `event`.
    pub fn handle(&mut self, event: &InputEvent, now: Duration) -> WidgetResponse {
        let mut response = WidgetResponse::default();
        if self.torn_down {
            tracing::trace!(
                target: TARGET_WIDGET,
                event = event.name(),
                "event after teardown ignored"
            );
            return response;
        }
        self.advance(now);

        if let Some(action) = event.pointer_action() {
            self.on_pointer(action, now, &mut response);
            return response;
        }

        match event {
            InputEvent::HoverEnter => self.on_hover_enter(now),
            InputEvent::HoverExit => {
                if !self.gesture.is_dragging() {
                    self.end_hover();
                }
            }
            InputEvent::Click => response.click = Some(self.on_click()),
            InputEvent::Resize(size) => self.tracker.set_viewport(*size),
            InputEvent::Measure(size) => self.tracker.measure(*size),
            InputEvent::DismissModal => response.modal_closed = self.dismiss(),
            InputEvent::Navigate(pathname) => self.navigate(pathname),
            // Touch events without an active touch point.
            _ => {}
        }
        response
    }

    /// Apply every timer due at `now`. Returns whether the view changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        if self.torn_down {
            return false;
        }
        self.advance(now)
    }

    /// Earliest pending timer deadline, for hosts that sleep between ticks.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.gesture.cooldown_deadline(), self.greeting.next_tick()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Tear the widget down and return the final listener command.
    pub fn teardown(mut self) -> Option<ListenerCommand> {
        self.shutdown()
    }

    /// Cancel all timers, close the chat, and release document listeners.
    ///
    /// Idempotent; returns the `Detach` command the first time listeners
    /// were still held.
    pub fn shutdown(&mut self) -> Option<ListenerCommand> {
        if self.torn_down {
            return None;
        }
        self.torn_down = true;
        self.end_hover();
        if self.modal.close() {
            self.chat.unmount();
        }
        let listener = self.gesture.teardown();
        tracing::debug!(target: TARGET_WIDGET, released = listener.is_some(), "shutdown");
        listener
    }

    /// Current paint state.
    #[must_use]
    pub fn view(&self) -> WidgetView<'_> {
        let dragging = self.gesture.is_dragging();
        let position = self.tracker.position();
        let bubble = (self.is_hovering() && !dragging).then(|| BubbleView {
            text: self.greeting.revealed_text(),
            side: BubbleSide::for_position(position.x, self.tracker.viewport().width),
            complete: self.greeting.is_complete(),
        });
        WidgetView {
            position,
            cursor: if dragging { Cursor::Grabbing } else { Cursor::Grab },
            lifted: dragging,
            bubble,
            modal: ModalView {
                open: self.modal.is_open(),
                title: &self.title,
            },
        }
    }

    // -- accessors ---------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn position(&self) -> Point {
        self.tracker.position()
    }

    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    #[inline]
    #[must_use]
    pub fn has_dragged(&self) -> bool {
        self.gesture.has_dragged()
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    #[inline]
    #[must_use]
    pub fn is_hovering(&self) -> bool {
        self.hover.is_some()
    }

    /// Revealed part of the greeting (empty when not hovering).
    #[must_use]
    pub fn hover_text(&self) -> &str {
        self.greeting.revealed_text()
    }

    #[inline]
    #[must_use]
    pub fn modal(&self) -> ModalState {
        self.modal
    }

    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Pathname of the current page, once known.
    #[inline]
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn chat(&self) -> &C {
        &self.chat
    }

    #[inline]
    pub fn chat_mut(&mut self) -> &mut C {
        &mut self.chat
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

// ---------------------------------------------------------------------------
// Internal handlers
// ---------------------------------------------------------------------------

impl<C: ChatCollaborator> FloatingAssistantWidget<C> {
    fn advance(&mut self, now: Duration) -> bool {
        let cooled = self.gesture.poll(now);
        let revealed = if self.hover.is_some() {
            self.greeting.tick(now) > 0
        } else {
            false
        };
        cooled || revealed
    }

    fn on_pointer(&mut self, action: PointerAction, now: Duration, response: &mut WidgetResponse) {
        match action {
            PointerAction::Press(source, point) => {
                self.end_hover();
                let out = self.gesture.press(source, point, self.tracker.position(), now);
                response.listener = out.listener;
            }
            PointerAction::Move(source, point) => {
                if self.gesture.is_dragging() {
                    self.end_hover();
                }
                if let Some(out) = self.gesture.move_to(source, point, &mut self.tracker) {
                    response.moved = Some(out.position);
                    response.prevent_default = out.prevent_default;
                }
            }
            PointerAction::Release(source) => {
                if let Some(out) = self.gesture.release(source, now) {
                    response.listener = out.listener;
                }
            }
        }
    }

    fn on_hover_enter(&mut self, now: Duration) {
        if self.gesture.is_dragging() {
            return;
        }
        let token = self.greeting.start_reveal(
            &self.config.greeting,
            self.config.reveal_interval(),
            now,
        );
        self.hover = Some(token);
    }

    fn end_hover(&mut self) {
        if let Some(token) = self.hover.take() {
            self.greeting.cancel(token);
        }
    }

    fn on_click(&mut self) -> ClickDecision {
        if !self.gesture.click_allowed() {
            tracing::debug!(
                target: TARGET_WIDGET,
                dragging = self.gesture.is_dragging(),
                has_dragged = self.gesture.has_dragged(),
                "click suppressed"
            );
            return ClickDecision::Suppressed;
        }
        match self.modal.open() {
            OpenOutcome::AlreadyOpen => ClickDecision::AlreadyOpen,
            OpenOutcome::Opened { first } => {
                let props = ChatProps {
                    embedded: true,
                    has_initialized: self.modal.has_initialized(),
                    external_greeting: self.config.greeting.clone(),
                    greeting_signal: 0,
                };
                self.chat.mount(&props);
                tracing::debug!(target: TARGET_WIDGET, first, title = %self.title, "modal opened");
                ClickDecision::Opened { first }
            }
        }
    }

    fn dismiss(&mut self) -> bool {
        if !self.modal.close() {
            return false;
        }
        self.chat.unmount();
        tracing::debug!(target: TARGET_WIDGET, "modal closed");
        true
    }

    fn navigate(&mut self, pathname: &str) {
        if self.location.as_deref() == Some(pathname) {
            return;
        }
        let title = resolve_title(&self.routes, pathname, &self.config.fallback_title);
        if title != self.title {
            self.title = title.to_owned();
        }
        self.location = Some(pathname.to_owned());
        tracing::trace!(target: TARGET_WIDGET, pathname, title = %self.title, "title resolved");
    }
}
