#![forbid(unsafe_code)]

//! Scoped document listener registration.
//!
//! The widget listens for move and release events on the whole document
//! while a press is active. [`ListenerRegistration`] holds that subscription
//! and removes it when dropped, so every path out of a press (release,
//! teardown, host drop) releases the listeners exactly once.

use std::rc::Rc;

use fab_core::listener::ListenerSet;
use fab_core::logging::TARGET_WEB;

/// Document-level event target, as exposed by the page script.
///
/// Methods take `&self`; implementations wrap the JS target and use interior
/// mutability for any bookkeeping.
pub trait DocumentEvents {
    /// Subscribe the widget handlers for every event in `set`.
    fn add_listeners(&self, set: ListenerSet);

    /// Remove the widget handlers for every event in `set`.
    fn remove_listeners(&self, set: ListenerSet);
}

/// Live subscription on a [`DocumentEvents`] target. Dropping it unsubscribes.
#[derive(Debug)]
#[must_use = "dropping the registration removes the listeners"]
pub struct ListenerRegistration<D: DocumentEvents> {
    target: Rc<D>,
    set: ListenerSet,
}

impl<D: DocumentEvents> ListenerRegistration<D> {
    /// Subscribe `set` on `target`.
    pub fn attach(target: &Rc<D>, set: ListenerSet) -> Self {
        target.add_listeners(set);
        tracing::debug!(
            target: TARGET_WEB,
            events = ?set.event_names(),
            "document listeners attached"
        );
        Self {
            target: Rc::clone(target),
            set,
        }
    }

    /// Events held by this registration.
    #[inline]
    #[must_use]
    pub fn set(&self) -> ListenerSet {
        self.set
    }
}

impl<D: DocumentEvents> Drop for ListenerRegistration<D> {
    fn drop(&mut self) {
        self.target.remove_listeners(self.set);
        tracing::debug!(
            target: TARGET_WEB,
            events = ?self.set.event_names(),
            "document listeners removed"
        );
    }
}
