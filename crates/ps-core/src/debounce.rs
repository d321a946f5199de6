// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Cancellable input debounce
//!
//! Holds at most one pending value and the instant it was armed. Each new
//! input re-arms the deadline, so a burst of edits inside the window
//! commits exactly once, with the last value. The owner drives it from its
//! tick handler; tests drive it with synthetic instants and no timers.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<PendingCommit>,
}

#[derive(Debug)]
struct PendingCommit {
    value: String,
    armed_at: Instant,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm (or re-arm) the debounce with a new value.
    pub fn note_input(&mut self, value: impl Into<String>, now: Instant) {
        self.pending = Some(PendingCommit {
            value: value.into(),
            armed_at: now,
        });
    }

    /// Return the pending value once its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let armed_at = self.pending.as_ref()?.armed_at;
        if now.saturating_duration_since(armed_at) < self.delay {
            return None;
        }
        self.pending.take().map(|commit| commit.value)
    }

    /// Drop the pending value without committing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}
