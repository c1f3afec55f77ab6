//! Single-slot delayed tasks with last-call-wins semantics.
//!
//! Scheduling replaces whatever was pending and restarts the quiet period, so a burst of events
//! produces exactly one firing carrying the last payload. The caller passes the current time in,
//! so the event loop owns the clock.

use std::time::{Duration, Instant};

#[derive(Debug)]
struct Pending<T> {
    due: Instant,
    value: T,
}

#[derive(Debug)]
/// A delayed task holder with room for exactly one pending task.
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    #[must_use]
    /// Holder that fires `delay` after the most recent schedule.
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    #[must_use]
    /// Quiet period required before firing.
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending task with `value`, due one delay after `now`.
    pub fn schedule(&mut self, now: Instant, value: T) {
        self.pending = Some(Pending {
            due: now + self.delay,
            value,
        });
    }

    /// Drop the pending task, returning its payload.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Take the pending payload if its quiet period has elapsed by `now`.
    pub fn fire_due(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if p.due <= now => self.cancel(),
            _ => None,
        }
    }

    #[must_use]
    /// When the pending task becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    #[must_use]
    /// Whether a task is waiting.
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
#[path = "tests/debounce.rs"]
mod tests;
