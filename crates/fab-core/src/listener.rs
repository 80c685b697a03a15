#![forbid(unsafe_code)]

//! Document-level listener sets and acquire/release commands.
//!
//! While a press is active the widget needs move and release events from the
//! whole document, not just from its own element. Instead of attaching
//! listeners directly, state machines emit [`ListenerCommand`]s on their
//! transitions and the host applies them. Every `Attach` is matched by
//! exactly one `Detach`.

use bitflags::bitflags;

bitflags! {
    /// Document event listeners the widget may hold.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ListenerSet: u8 {
        const MOUSE_MOVE = 0b0001;
        const MOUSE_UP   = 0b0010;
        /// Registered non-passive so the host can suppress scrolling.
        const TOUCH_MOVE = 0b0100;
        const TOUCH_END  = 0b1000;
    }
}

impl ListenerSet {
    /// Listeners held for the duration of one drag session.
    pub const DRAG: Self = Self::MOUSE_MOVE
        .union(Self::MOUSE_UP)
        .union(Self::TOUCH_MOVE)
        .union(Self::TOUCH_END);

    /// DOM event names for the listeners in this set.
    #[must_use]
    pub fn event_names(self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(4);
        if self.contains(Self::MOUSE_MOVE) {
            names.push("mousemove");
        }
        if self.contains(Self::MOUSE_UP) {
            names.push("mouseup");
        }
        if self.contains(Self::TOUCH_MOVE) {
            names.push("touchmove");
        }
        if self.contains(Self::TOUCH_END) {
            names.push("touchend");
        }
        names
    }
}

/// Host command to acquire or release document listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerCommand {
    Attach(ListenerSet),
    Detach(ListenerSet),
}
