#![forbid(unsafe_code)]

//! Cancellable one-shot timers driven by host time.
//!
//! [`TimerQueue`] is the `setTimeout` of this workspace: owners schedule a
//! payload to fire after a delay, then drain due payloads with
//! [`pop_due`](TimerQueue::pop_due) whenever the host advances the clock.
//!
//! # Invariants
//!
//! 1. Timers fire in deadline order; equal deadlines fire in scheduling order.
//! 2. A cancelled timer never fires.
//! 3. After [`close`](TimerQueue::close) the queue is empty and rejects new
//!    timers, so nothing scheduled by a torn-down owner can fire later.
//! 4. `pop_due` reports the timer's own deadline, not the host time, so a
//!    callback that schedules the next timer keeps exact spacing even when
//!    the host advances in large jumps.

use std::time::Duration;

/// Opaque handle for a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Pending<T> {
    id: TimerId,
    deadline: Duration,
    payload: T,
}

/// A timer that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    /// Handle the timer was scheduled under.
    pub id: TimerId,
    /// Instant the timer was due.
    pub deadline: Duration,
    /// Scheduled payload.
    pub payload: T,
}

/// Owner-scoped queue of pending one-shot timers.
#[derive(Debug)]
pub struct TimerQueue<T> {
    pending: Vec<Pending<T>>,
    next_id: u64,
    closed: bool,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty, open queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 0,
            closed: false,
        }
    }

    /// Schedule `payload` to fire `delay` after `now`.
    ///
    /// Returns `None` once the queue has been closed.
    pub fn schedule(&mut self, now: Duration, delay: Duration, payload: T) -> Option<TimerId> {
        if self.closed {
            return None;
        }
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let deadline = now.saturating_add(delay);
        crate::trace!(timer = id.0, deadline_ms = deadline.as_millis() as u64, "timer scheduled");
        self.pending.push(Pending {
            id,
            deadline,
            payload,
        });
        Some(id)
    }

    /// Cancel one timer. Returns `true` if it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() < before
    }

    /// Cancel every pending timer, returning how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Cancel everything and refuse further scheduling.
    pub fn close(&mut self) -> usize {
        self.closed = true;
        let dropped = self.cancel_all();
        crate::debug!(dropped, "timer queue closed");
        dropped
    }

    /// Whether [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of timers still waiting to fire.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether `id` is still waiting to fire.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|p| p.deadline).min()
    }

    /// Remove and return the earliest timer due at or before `now`.
    ///
    /// Call in a loop: a payload handled between calls may schedule new
    /// timers that are already due.
    pub fn pop_due(&mut self, now: Duration) -> Option<Fired<T>> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.deadline <= now)
            .min_by_key(|(_, p)| (p.deadline, p.id))
            .map(|(idx, _)| idx)?;
        let Pending {
            id,
            deadline,
            payload,
        } = self.pending.remove(idx);
        Some(Fired {
            id,
            deadline,
            payload,
        })
    }
}
