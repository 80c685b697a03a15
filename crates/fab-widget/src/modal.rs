#![forbid(unsafe_code)]

//! Chat modal open state and the first-open latch.

/// Outcome of [`ModalState::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The modal was already open.
    AlreadyOpen,
    /// Opened; `first` is true exactly once per widget lifetime.
    Opened { first: bool },
}

/// Whether the chat modal is open and whether it has ever been opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModalState {
    open: bool,
    has_initialized: bool,
}

impl ModalState {
    /// Open the modal, latching `has_initialized` on first open.
    pub fn open(&mut self) -> OpenOutcome {
        if self.open {
            return OpenOutcome::AlreadyOpen;
        }
        self.open = true;
        let first = !self.has_initialized;
        self.has_initialized = true;
        OpenOutcome::Opened { first }
    }

    /// Close the modal. Returns whether it was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    #[inline]
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// One-way latch: true once the modal has been opened.
    #[inline]
    #[must_use]
    pub const fn has_initialized(&self) -> bool {
        self.has_initialized
    }
}
