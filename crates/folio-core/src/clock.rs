#![forbid(unsafe_code)]

//! Deterministic monotonic clock controlled by the host.
//!
//! The embedding page (or a test) is the only source of time. It either sets
//! the clock from its own monotonic timestamp or advances it by a delta.
//! The clock never runs backwards: a `set` to an earlier instant is ignored.

use std::time::Duration;

/// Host-driven monotonic clock starting at zero.
#[derive(Debug, Default, Clone)]
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

    /// Current monotonic time since mount.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Set current monotonic time. Earlier instants are ignored.
    ///
    /// Returns the elapsed delta (zero when the request was ignored).
    pub fn set(&mut self, now: Duration) -> Duration {
        let dt = now.saturating_sub(self.now);
        if now > self.now {
            self.now = now;
        }
        dt
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}
