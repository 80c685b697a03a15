#![forbid(unsafe_code)]

//! Browser driver for [`FloatingAssistantWidget`].
//!
//! [`WebWidgetHost`] owns the widget, a [`DeterministicClock`], and the
//! document listener registration. The page script forwards DOM events to
//! [`dispatch`](WebWidgetHost::dispatch), calls
//! [`advance`](WebWidgetHost::advance) from its timer callback, and applies
//! the returned [`HostEffects`].

use std::rc::Rc;
use std::time::Duration;

use fab_core::event::InputEvent;
use fab_core::geometry::Point;
use fab_core::listener::ListenerCommand;
use fab_core::logging::TARGET_WEB;
use fab_widget::{ChatCollaborator, ClickDecision, FloatingAssistantWidget, WidgetView};

use crate::DeterministicClock;
use crate::listeners::{DocumentEvents, ListenerRegistration};

/// What the page script must do after a dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HostEffects {
    /// Call `preventDefault()` on the DOM event.
    pub prevent_default: bool,
    /// The chat modal opened.
    pub modal_opened: bool,
    /// The chat modal closed.
    pub modal_closed: bool,
    /// New widget origin to write to the element style.
    pub moved: Option<Point>,
}

/// Widget plus the browser-side resources it holds.
pub struct WebWidgetHost<C: ChatCollaborator, D: DocumentEvents> {
    widget: FloatingAssistantWidget<C>,
    clock: DeterministicClock,
    document: Rc<D>,
    registration: Option<ListenerRegistration<D>>,
}

impl<C: ChatCollaborator, D: DocumentEvents> WebWidgetHost<C, D> {
    /// Host `widget` on `document` with the clock at zero.
    #[must_use]
    pub fn new(widget: FloatingAssistantWidget<C>, document: Rc<D>) -> Self {
        Self {
            widget,
            clock: DeterministicClock::new(),
            document,
            registration: None,
        }
    }

    /// Forward one DOM event at the current clock time.
    pub fn dispatch(&mut self, event: &InputEvent) -> HostEffects {
        let response = self.widget.handle(event, self.clock.now());
        if let Some(command) = response.listener {
            self.apply(command);
        }
        HostEffects {
            prevent_default: response.prevent_default,
            modal_opened: matches!(response.click, Some(ClickDecision::Opened { .. })),
            modal_closed: response.modal_closed,
            moved: response.moved,
        }
    }

    /// Decode and forward one JSON-encoded DOM event.
    ///
    /// Events the widget ignores yield default effects.
    #[cfg(feature = "input-parser")]
    pub fn dispatch_json(
        &mut self,
        json: &str,
    ) -> Result<HostEffects, crate::input_parser::InputParseError> {
        match crate::input_parser::parse_dom_event(json)? {
            Some(event) => Ok(self.dispatch(&event)),
            None => Ok(HostEffects::default()),
        }
    }

    /// Advance the clock by `dt` and fire due timers. Returns whether the
    /// view changed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.clock.advance(dt);
        self.widget.tick(self.clock.now())
    }

    /// Move the clock to `now` (e.g. `performance.now()`) and fire due
    /// timers. Times earlier than the clock are ignored.
    pub fn set_time(&mut self, now: Duration) -> bool {
        self.clock.set(now);
        self.widget.tick(self.clock.now())
    }

    /// Delay until the next timer, for the page script's `setTimeout`.
    #[must_use]
    pub fn next_timeout(&self) -> Option<Duration> {
        self.widget
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(self.clock.now()))
    }

    /// Current paint state.
    #[must_use]
    pub fn view(&self) -> WidgetView<'_> {
        self.widget.view()
    }

    #[inline]
    #[must_use]
    pub fn widget(&self) -> &FloatingAssistantWidget<C> {
        &self.widget
    }

    #[inline]
    #[must_use]
    pub fn clock(&self) -> DeterministicClock {
        self.clock
    }

    /// Whether document listeners are currently subscribed.
    #[inline]
    #[must_use]
    pub fn listening(&self) -> bool {
        self.registration.is_some()
    }

    fn apply(&mut self, command: ListenerCommand) {
        match command {
            ListenerCommand::Attach(set) => {
                // Replacing a live registration drops it first.
                self.registration = None;
                self.registration = Some(ListenerRegistration::attach(&self.document, set));
            }
            ListenerCommand::Detach(set) => {
                if self.registration.take().is_none() {
                    tracing::warn!(
                        target: TARGET_WEB,
                        events = ?set.event_names(),
                        "detach without registration"
                    );
                }
            }
        }
    }
}

impl<C: ChatCollaborator, D: DocumentEvents> Drop for WebWidgetHost<C, D> {
    fn drop(&mut self) {
        if let Some(command) = self.widget.shutdown() {
            self.apply(command);
        }
        self.registration = None;
    }
}
