#![forbid(unsafe_code)]

//! `fab-web` drives the floating assistant widget from a browser page.
//!
//! Design goals:
//! - **Host-driven I/O**: the page script forwards DOM events and resizes.
//! - **Deterministic time**: the host advances a monotonic clock explicitly.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! This crate does not bind to `wasm-bindgen`. It provides the building
//! blocks a thin JS shim wraps: [`host::WebWidgetHost`] owns the widget and
//! turns listener commands into [`listeners::ListenerRegistration`]s on a
//! [`listeners::DocumentEvents`] target.

pub mod host;
#[cfg(feature = "input-parser")]
pub mod input_parser;
pub mod listeners;

use core::time::Duration;

pub use host::{HostEffects, WebWidgetHost};
pub use listeners::{DocumentEvents, ListenerRegistration};

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time. Earlier values are ignored.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Current monotonic time.
    #[inline]
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }
}
