#![forbid(unsafe_code)]

//! Hover greeting: a typewriter reveal of a fixed string.
//!
//! [`GreetingPlayer`] reveals its text one grapheme per interval. The index
//! of the next grapheme is kept across ticks, so a reveal never restarts from
//! the beginning unless a new one is started.
//!
//! # Invariants
//!
//! 1. `revealed_text()` is always a grapheme-aligned prefix of the full text.
//! 2. The ticker is armed only while the reveal is incomplete.
//! 3. Starting a reveal cancels the previous one and empties the text.
//! 4. A [`RevealToken`] from an earlier reveal cannot cancel a later one.

use std::time::Duration;

use unicode_segmentation::UnicodeSegmentation;

use crate::logging::TARGET_GREETING;
use crate::timer::TimerSlot;

/// Greeting shown next to the widget on hover.
pub const DEFAULT_GREETING: &str = "你好，我是你的专属助手小埋，请问有什么可以帮到你的？";

/// Time between two revealed characters.
pub const DEFAULT_REVEAL_INTERVAL: Duration = Duration::from_millis(35);

/// Identifies one reveal started by [`GreetingPlayer::start_reveal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevealToken {
    session: u64,
}

/// Which side of the widget the greeting bubble sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleSide {
    Left,
    Right,
}

impl BubbleSide {
    /// Place the bubble toward the larger half of the viewport.
    ///
    /// A widget left of the vertical mid-line gets its bubble on the right.
    #[must_use]
    pub fn for_position(x: f64, viewport_width: f64) -> Self {
        if x < viewport_width / 2.0 {
            Self::Right
        } else {
            Self::Left
        }
    }
}

/// Typewriter player for the hover greeting.
#[derive(Debug, Clone)]
pub struct GreetingPlayer {
    full_text: String,
    /// Byte offset just past each grapheme.
    ends: Vec<usize>,
    revealed: usize,
    ticker: TimerSlot,
    session: u64,
    active: bool,
}

impl Default for GreetingPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl GreetingPlayer {
    /// Create an idle player with no text.
    #[must_use]
    pub fn new() -> Self {
        Self {
            full_text: String::new(),
            ends: Vec::new(),
            revealed: 0,
            ticker: TimerSlot::new("greeting-ticker"),
            session: 0,
            active: false,
        }
    }

    /// Start revealing `full_text`, one grapheme every `interval`.
    ///
    /// Any reveal in flight is cancelled first and the revealed text is
    /// emptied. The first grapheme appears at `now + interval`.
    pub fn start_reveal(
        &mut self,
        full_text: &str,
        interval: Duration,
        now: Duration,
    ) -> RevealToken {
        self.ticker.cancel();
        if self.full_text != full_text {
            self.full_text = full_text.to_owned();
            self.ends = full_text
                .grapheme_indices(true)
                .map(|(start, g)| start + g.len())
                .collect();
        }
        self.revealed = 0;
        self.session = self.session.wrapping_add(1);
        self.active = true;

        if !self.ends.is_empty() {
            self.ticker.schedule_every(now, interval);
        }

        tracing::debug!(
            target: TARGET_GREETING,
            session = self.session,
            graphemes = self.ends.len(),
            interval_ms = interval.as_millis() as u64,
            "reveal started"
        );

        RevealToken {
            session: self.session,
        }
    }

    /// Cancel the reveal identified by `token` and clear its text.
    ///
    /// Returns `false` (and does nothing) for a stale token.
    pub fn cancel(&mut self, token: RevealToken) -> bool {
        if !self.active || token.session != self.session {
            tracing::trace!(
                target: TARGET_GREETING,
                token = token.session,
                current = self.session,
                "stale reveal token ignored"
            );
            return false;
        }
        self.stop();
        true
    }

    /// Cancel whatever reveal is running and clear the text.
    pub fn stop(&mut self) {
        self.ticker.cancel();
        self.revealed = 0;
        self.active = false;
    }

    /// Apply every tick due at `now`. Returns the number of graphemes added.
    pub fn tick(&mut self, now: Duration) -> usize {
        let mut added = 0;
        while self.revealed < self.ends.len() {
            if self.ticker.fire_due(now).is_none() {
                break;
            }
            self.revealed += 1;
            added += 1;
        }
        if self.revealed >= self.ends.len() && self.ticker.cancel() {
            tracing::debug!(target: TARGET_GREETING, session = self.session, "reveal complete");
        }
        added
    }

    /// The revealed prefix.
    #[must_use]
    pub fn revealed_text(&self) -> &str {
        match self.revealed {
            0 => "",
            n => &self.full_text[..self.ends[n - 1]],
        }
    }

    /// Number of revealed graphemes.
    #[inline]
    #[must_use]
    pub fn revealed_len(&self) -> usize {
        self.revealed
    }

    /// Number of graphemes in the full text.
    #[inline]
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.ends.len()
    }

    /// Whether the whole text is visible.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.active && self.revealed == self.ends.len()
    }

    /// Whether a reveal has been started and not cancelled.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the ticker is still armed.
    #[inline]
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_armed()
    }

    /// Deadline of the next tick, if armed.
    #[inline]
    #[must_use]
    pub fn next_tick(&self) -> Option<Duration> {
        self.ticker.deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);
    const INTERVAL: Duration = DEFAULT_REVEAL_INTERVAL;

    #[test]
    fn reveals_one_grapheme_per_interval() {
        let mut p = GreetingPlayer::new();
        p.start_reveal("hello", INTERVAL, Duration::ZERO);
        assert_eq!(p.revealed_text(), "");
        assert_eq!(p.tick(34 * MS), 0);
        assert_eq!(p.tick(35 * MS), 1);
        assert_eq!(p.revealed_text(), "h");
        assert_eq!(p.tick(70 * MS), 1);
        assert_eq!(p.revealed_text(), "he");
    }

    #[test]
    fn late_poll_catches_up_without_overrun() {
        let mut p = GreetingPlayer::new();
        p.start_reveal("abc", INTERVAL, Duration::ZERO);
        assert_eq!(p.tick(10_000 * MS), 3);
        assert_eq!(p.revealed_text(), "abc");
        assert!(p.is_complete());
        assert!(!p.is_ticking());
    }

    #[test]
    fn default_greeting_completes_after_n_intervals() {
        let mut p = GreetingPlayer::new();
        p.start_reveal(DEFAULT_GREETING, INTERVAL, Duration::ZERO);
        let n = p.total_len();
        assert_eq!(n, DEFAULT_GREETING.chars().count());
        p.tick(INTERVAL * (n as u32 - 1));
        assert!(!p.is_complete());
        p.tick(INTERVAL * n as u32);
        assert_eq!(p.revealed_text(), DEFAULT_GREETING);
        assert!(!p.is_ticking());
    }

    #[test]
    fn combining_marks_stay_together() {
        let mut p = GreetingPlayer::new();
        p.start_reveal("e\u{301}x", INTERVAL, Duration::ZERO);
        assert_eq!(p.total_len(), 2);
        p.tick(INTERVAL);
        assert_eq!(p.revealed_text(), "e\u{301}");
    }

    #[test]
    fn restart_clears_text() {
        let mut p = GreetingPlayer::new();
        p.start_reveal("abcdef", INTERVAL, Duration::ZERO);
        p.tick(100 * MS);
        assert_eq!(p.revealed_len(), 2);
        p.start_reveal("abcdef", INTERVAL, 100 * MS);
        assert_eq!(p.revealed_text(), "");
        assert_eq!(p.next_tick(), Some(135 * MS));
    }

    #[test]
    fn cancel_clears_and_stops() {
        let mut p = GreetingPlayer::new();
        let token = p.start_reveal("abcdef", INTERVAL, Duration::ZERO);
        p.tick(70 * MS);
        assert!(p.cancel(token));
        assert_eq!(p.revealed_text(), "");
        assert_eq!(p.tick(1_000 * MS), 0);
        assert_eq!(p.revealed_text(), "");
    }

    #[test]
    fn stale_token_cannot_cancel_new_reveal() {
        let mut p = GreetingPlayer::new();
        let old = p.start_reveal("abc", INTERVAL, Duration::ZERO);
        let _new = p.start_reveal("abc", INTERVAL, 10 * MS);
        assert!(!p.cancel(old));
        p.tick(45 * MS);
        assert_eq!(p.revealed_text(), "a");
    }

    #[test]
    fn empty_text_never_ticks() {
        let mut p = GreetingPlayer::new();
        p.start_reveal("", INTERVAL, Duration::ZERO);
        assert!(!p.is_ticking());
        assert!(p.is_complete());
        assert_eq!(p.tick(1_000 * MS), 0);
    }

    #[test]
    fn bubble_side_follows_midline() {
        assert_eq!(BubbleSide::for_position(100.0, 1000.0), BubbleSide::Right);
        assert_eq!(BubbleSide::for_position(500.0, 1000.0), BubbleSide::Left);
        assert_eq!(BubbleSide::for_position(900.0, 1000.0), BubbleSide::Left);
    }
}
