#![forbid(unsafe_code)]

//! Stagger utilities: coordinated delay offsets for animation lists.
//!
//! [`stagger_offsets`] produces the entrance delay for each item in a list,
//! used for cascading fade-ins such as the loading word cloud.
//!
//! # Invariants
//!
//! 1. `stagger_offsets(0, ..)` returns an empty vec.
//! 2. First offset is always `Duration::ZERO`.
//! 3. offset[i] = i * delay, computed in integer arithmetic.

use std::time::Duration;

/// Compute linear stagger delay offsets for `count` items.
///
/// Each offset represents when that item's animation should begin.
#[must_use]
pub fn stagger_offsets(count: usize, delay: Duration) -> Vec<Duration> {
    (0..count)
        .map(|i| delay.saturating_mul(u32::try_from(i).unwrap_or(u32::MAX)))
        .collect()
}
