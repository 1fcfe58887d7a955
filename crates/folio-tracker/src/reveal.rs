#![forbid(unsafe_code)]

//! Reveal-on-scroll: mark elements visible the first time they enter the
//! viewport, and keep them visible.
//!
//! The host mirrors the tracker onto an intersection observer: elements
//! returned as observed are watched, and every intersection entry is pushed
//! back through [`RevealTracker::on_intersection`]. Once an element is
//! revealed the tracker stops observing it.
//!
//! # Invariants
//!
//! 1. [`RevealSet`] is add-only for the life of the tracker.
//! 2. Each element is observed at most once and is unobserved on reveal.
//! 3. Removing an element from the document unobserves it but does not
//!    un-reveal it.

use std::collections::BTreeSet;

use crate::id::ElementId;

/// Reveal configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealConfig {
    /// Minimum intersection ratio that counts as "seen".
    /// Default: 0.1
    pub threshold: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self { threshold: 0.1 }
    }
}

/// Elements that have been seen at least once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealSet {
    ids: BTreeSet<ElementId>,
}

impl RevealSet {
    /// Whether `id` has been revealed.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Number of revealed elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing has been revealed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Revealed ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &ElementId> {
        self.ids.iter()
    }

    fn insert(&mut self, id: ElementId) -> bool {
        self.ids.insert(id)
    }
}

/// One-shot visibility tracker.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    config: RevealConfig,
    observed: BTreeSet<ElementId>,
    revealed: RevealSet,
    connected: bool,
}

impl Default for RevealTracker {
    fn default() -> Self {
        Self::new(RevealConfig::default())
    }
}

impl RevealTracker {
    /// Create a connected tracker with nothing observed.
    #[must_use]
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            observed: BTreeSet::new(),
            revealed: RevealSet::default(),
            connected: true,
        }
    }

    /// Start observing `id`. Returns `true` if the host should attach an
    /// observer: `false` for elements already observed or revealed, or once
    /// disconnected.
    pub fn register(&mut self, id: impl Into<ElementId>) -> bool {
        let id = id.into();
        if !self.connected || self.revealed.contains(id.as_str()) {
            return false;
        }
        self.observed.insert(id)
    }

    /// Handle an intersection entry. Returns `true` if `id` was revealed by
    /// this entry. Entries for unobserved elements, and ratios that are not
    /// positive and at or above the threshold (NaN included), are ignored.
    pub fn on_intersection(&mut self, id: &str, ratio: f32) -> bool {
        if !self.connected || !(ratio > 0.0 && ratio >= self.config.threshold) {
            return false;
        }
        let Some(id) = self.observed.take(id) else {
            return false;
        };
        tracing::debug!(element = %id, ratio, "element revealed");
        self.revealed.insert(id)
    }

    /// The element left the document; drop its observer. Returns `true` if
    /// it was being observed.
    pub fn unregister(&mut self, id: &str) -> bool {
        self.observed.remove(id)
    }

    /// Drop every observer and ignore further input. Revealed ids are kept.
    pub fn disconnect(&mut self) -> usize {
        self.connected = false;
        let dropped = self.observed.len();
        self.observed.clear();
        dropped
    }

    /// Whether `id` has been revealed.
    #[must_use]
    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }

    /// Whether `id` is currently observed.
    #[must_use]
    pub fn is_observing(&self, id: &str) -> bool {
        self.observed.contains(id)
    }

    /// Number of live observers.
    #[must_use]
    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Everything revealed so far.
    #[must_use]
    pub fn revealed(&self) -> &RevealSet {
        &self.revealed
    }
}
