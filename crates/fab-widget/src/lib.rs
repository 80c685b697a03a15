#![forbid(unsafe_code)]

//! Floating assistant widget shell.
//!
//! # Role in the workspace
//! `fab-widget` composes the `fab-core` state machines into
//! [`FloatingAssistantWidget`]: a draggable launcher that greets on hover and
//! opens the assistant chat in a modal on click.
//!
//! # Primary responsibilities
//! - **Event routing**: [`widget`] applies due timers, then dispatches each
//!   input to the gesture classifier, the greeting player, or the modal.
//! - **Modal state**: [`modal::ModalState`] tracks open/closed and the
//!   first-open latch.
//! - **Collaborators**: [`collaborator`] defines the chat and list-data
//!   contracts the widget sits next to.
//! - **Titles**: [`routes`] names the modal after the current page.

pub mod collaborator;
pub mod modal;
pub mod routes;
pub mod widget;

pub use collaborator::{ChatCollaborator, ChatProps, NoChat};
pub use modal::{ModalState, OpenOutcome};
pub use routes::{RouteNode, resolve_title};
pub use widget::{
    BubbleView, ClickDecision, Cursor, FloatingAssistantWidget, ModalView, WidgetResponse,
    WidgetView,
};
