#![forbid(unsafe_code)]

//! Host-driven timer slots.
//!
//! A [`TimerSlot`] is the single authoritative timer for one role (for
//! example "drag cool-down" or "greeting ticker"). Scheduling always cancels
//! whatever the slot held before, and every schedule bumps a generation
//! counter, so a [`TimerHandle`] kept from an earlier schedule can never
//! cancel or be mistaken for the current one.
//!
//! Time is a monotonic `Duration` since host start, supplied by the caller.
//! Slots never read a clock themselves.
//!
//! # Invariants
//!
//! 1. At most one deadline is armed per slot.
//! 2. `fire_due` returns a handle only while that handle is current.
//! 3. A one-shot slot is disarmed by the fire that returns its handle.
//! 4. A periodic slot advances its deadline by exactly one period per fire,
//!    so a late poll catches up tick by tick.
//!
//! # Failure Modes
//!
//! - Zero period: clamped to 1ns so catch-up loops terminate.

use std::time::Duration;

use crate::logging::TARGET_TIMER;

const MIN_PERIOD: Duration = Duration::from_nanos(1);

/// Identifies one schedule of a [`TimerSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    generation: u64,
}

impl TimerHandle {
    /// Generation number of the schedule that produced this handle.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

/// A single-role timer with one authoritative handle.
#[derive(Debug, Clone)]
pub struct TimerSlot {
    role: &'static str,
    deadline: Option<Duration>,
    period: Option<Duration>,
    generation: u64,
}

impl TimerSlot {
    /// Create an idle slot for `role` (used in log fields).
    #[must_use]
    pub const fn new(role: &'static str) -> Self {
        Self {
            role,
            deadline: None,
            period: None,
            generation: 0,
        }
    }

    /// Arm a one-shot timer firing at `now + delay`.
    pub fn schedule(&mut self, now: Duration, delay: Duration) -> TimerHandle {
        self.arm(now.saturating_add(delay), None)
    }

    /// Arm a periodic timer firing every `period`, first at `now + period`.
    pub fn schedule_every(&mut self, now: Duration, period: Duration) -> TimerHandle {
        let period = period.max(MIN_PERIOD);
        self.arm(now.saturating_add(period), Some(period))
    }

    fn arm(&mut self, deadline: Duration, period: Option<Duration>) -> TimerHandle {
        if self.deadline.is_some() {
            tracing::trace!(
                target: TARGET_TIMER,
                role = self.role,
                generation = self.generation,
                "replacing armed timer"
            );
        }
        self.generation = self.generation.wrapping_add(1);
        self.deadline = Some(deadline);
        self.period = period;
        TimerHandle {
            generation: self.generation,
        }
    }

    /// Disarm the slot. Returns whether anything was armed.
    pub fn cancel(&mut self) -> bool {
        self.period = None;
        self.deadline.take().is_some()
    }

    /// Disarm the slot only if `handle` is the current schedule.
    pub fn cancel_handle(&mut self, handle: TimerHandle) -> bool {
        if self.is_current(handle) {
            self.cancel()
        } else {
            false
        }
    }

    /// Whether `handle` identifies the armed schedule.
    #[must_use]
    pub fn is_current(&self, handle: TimerHandle) -> bool {
        self.deadline.is_some() && handle.generation == self.generation
    }

    /// Whether a deadline is armed.
    #[inline]
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Next deadline, if armed.
    #[inline]
    #[must_use]
    pub const fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Fire once if the deadline is due at `now`.
    ///
    /// One-shot slots disarm; periodic slots advance by one period. Call in a
    /// loop to catch up on periodic ticks missed by a late poll.
    pub fn fire_due(&mut self, now: Duration) -> Option<TimerHandle> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        let handle = TimerHandle {
            generation: self.generation,
        };
        self.deadline = self.period.map(|period| deadline.saturating_add(period));
        Some(handle)
    }
}
