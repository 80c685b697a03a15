#![forbid(unsafe_code)]

//! Core: geometry, input events, gesture classification, and greeting playback.
//!
//! # Role in the workspace
//! `fab-core` holds the leaf state machines of the floating assistant widget.
//! Nothing here renders or touches the DOM; every operation is driven by the
//! host with explicit input values and a monotonic timestamp.
//!
//! # Primary responsibilities
//! - **Position tracking**: [`position::PositionTracker`] keeps the widget
//!   inside the viewport via [`geometry::clamp_position`].
//! - **Gesture classification**: [`gesture::GestureClassifier`] separates a
//!   drag from a click using a movement threshold and a release cool-down.
//! - **Greeting playback**: [`greeting::GreetingPlayer`] reveals the hover
//!   greeting one character per tick.
//! - **Timers**: [`timer::TimerSlot`] gives each timer role a single
//!   authoritative handle so stale fires no-op.
//!
//! # How it fits in the system
//! `fab-widget` composes these pieces into the widget shell, and `fab-web`
//! feeds it browser events and clock advances.

pub mod config;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod greeting;
pub mod listener;
pub mod logging;
pub mod position;
pub mod timer;
