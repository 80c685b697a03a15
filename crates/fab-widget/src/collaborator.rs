#![forbid(unsafe_code)]

//! Contracts for the collaborators the widget hosts or sits next to.
//!
//! The widget never looks inside the chat it opens. It only mounts a
//! [`ChatCollaborator`] with [`ChatProps`] when the modal opens and unmounts
//! it when the modal closes. [`ChatSession`] is the stock collaborator: it
//! keeps the message history and talks to a [`ChatService`].
//!
//! [`ListDataService`] is the paginated fetch used by the record list pages;
//! it is part of the same boundary and kept here so hosts implement both
//! services against one set of types.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use fab_core::logging::TARGET_WIDGET;

// ---------------------------------------------------------------------------
// Chat collaborator
// ---------------------------------------------------------------------------

/// Values handed to the embedded chat when the modal opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatProps {
    /// Always `true` inside the widget modal.
    pub embedded: bool,
    /// Latch value after the opening click (see `ModalState`).
    pub has_initialized: bool,
    /// Greeting the chat shows as its opening assistant line.
    pub external_greeting: String,
    /// Bumped by hosts that want the chat to replay its greeting.
    pub greeting_signal: u32,
}

/// Chat content hosted by the widget modal.
pub trait ChatCollaborator {
    /// The modal opened; render with `props`.
    fn mount(&mut self, props: &ChatProps);

    /// The modal closed; its content is destroyed.
    fn unmount(&mut self);
}

/// Collaborator that renders nothing. Useful for hosts without a chat.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoChat;

impl ChatCollaborator for NoChat {
    fn mount(&mut self, _props: &ChatProps) {}

    fn unmount(&mut self) {}
}

// ---------------------------------------------------------------------------
// Chat service
// ---------------------------------------------------------------------------

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One chat message, shaped like the completion API payload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    /// Create a message.
    #[must_use]
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Backend that answers a conversation.
pub trait ChatService {
    type Error: std::error::Error;

    /// Send the full history and receive the assistant reply.
    fn send(&mut self, history: &[ChatMessage]) -> Result<ChatMessage, Self::Error>;
}

/// Stock chat collaborator: history plus a [`ChatService`].
///
/// History lives only while mounted; the modal destroys its content on
/// close, so every open starts from the greeting again.
#[derive(Debug)]
pub struct ChatSession<S> {
    service: S,
    history: Vec<ChatMessage>,
    props: Option<ChatProps>,
}

impl<S: ChatService> ChatSession<S> {
    /// Create an unmounted session.
    #[must_use]
    pub fn new(service: S) -> Self {
        Self {
            service,
            history: Vec::new(),
            props: None,
        }
    }

    /// Whether the session is mounted in an open modal.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.props.is_some()
    }

    /// Props of the current mount.
    #[must_use]
    pub fn props(&self) -> Option<&ChatProps> {
        self.props.as_ref()
    }

    /// Messages shown in the chat.
    #[must_use]
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Borrow the service.
    #[must_use]
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Append `text` as a user message and ask the service for a reply.
    ///
    /// On failure the user message stays in the history and the service
    /// error is returned; no reply is appended.
    pub fn submit(&mut self, text: impl Into<String>) -> Result<&ChatMessage, S::Error> {
        self.history.push(ChatMessage::new(ChatRole::User, text));
        let reply = match self.service.send(&self.history) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(target: TARGET_WIDGET, error = %e, "chat service failed");
                return Err(e);
            }
        };
        self.history.push(reply);
        let last = self.history.len() - 1;
        Ok(&self.history[last])
    }
}

impl<S: ChatService> ChatCollaborator for ChatSession<S> {
    fn mount(&mut self, props: &ChatProps) {
        if self.history.is_empty() && !props.external_greeting.is_empty() {
            self.history.push(ChatMessage::new(
                ChatRole::Assistant,
                props.external_greeting.clone(),
            ));
        }
        self.props = Some(props.clone());
    }

    fn unmount(&mut self) {
        self.history.clear();
        self.props = None;
    }
}

// ---------------------------------------------------------------------------
// List-data service
// ---------------------------------------------------------------------------

/// Paginated query for a record list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
    /// Column filters, keyed by field name.
    pub filters: BTreeMap<String, String>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            filters: BTreeMap::new(),
        }
    }
}

impl PageQuery {
    /// Query a specific page with the default size.
    #[must_use]
    pub fn page(page: u32) -> Self {
        Self {
            page: page.max(1),
            ..Self::default()
        }
    }

    /// Add a filter.
    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    /// Zero-based index of the first row of this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }
}

/// One page of rows plus the total row count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<R> {
    pub data: Vec<R>,
    pub total: u64,
}

impl<R> Page<R> {
    /// Number of pages needed for `total` rows.
    #[must_use]
    pub fn page_count(&self, page_size: u32) -> u64 {
        match page_size {
            0 => 0,
            size => self.total.div_ceil(u64::from(size)),
        }
    }
}

/// Backend for paginated record lists.
pub trait ListDataService {
    type Row;
    type Error: std::error::Error;

    /// Fetch one page.
    fn fetch(&mut self, query: &PageQuery) -> Result<Page<Self::Row>, Self::Error>;
}
