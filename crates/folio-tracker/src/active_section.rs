#![forbid(unsafe_code)]

//! Scroll spy: which page section the nav bar should highlight.
//!
//! The marker line sits `nav_offset` pixels below the top of the viewport
//! (just under the sticky nav bar). The active section is the first section,
//! in list order, whose live bounds contain the marker.
//!
//! # Invariants
//!
//! 1. Before [`activate`](ActiveSectionTracker::activate) nothing is active
//!    and scroll input is ignored.
//! 2. After activation exactly one listed section is active.
//! 3. If no section contains the marker the previous section stays active.
//! 4. The result depends only on the scroll offset and layout, so a
//!    stationary page never oscillates.
//!
//! # Failure Modes
//!
//! - A section the layout cannot measure (not in the document yet) is
//!   skipped for that scan.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::id::SectionId;

/// Document-space vertical extent of a section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBounds {
    /// Offset of the section's top edge from the document top, in px.
    pub top: f64,
    /// Section height in px.
    pub height: f64,
}

impl SectionBounds {
    /// Bounds from top offset and height.
    #[must_use]
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Half-open containment: `[top, top + height)`.
    #[must_use]
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Live layout lookup supplied by the host.
pub trait SectionLayout {
    /// Current bounds of `id`, or `None` if it is not in the document.
    fn bounds(&self, id: &SectionId) -> Option<SectionBounds>;
}

impl<F> SectionLayout for F
where
    F: Fn(&SectionId) -> Option<SectionBounds>,
{
    fn bounds(&self, id: &SectionId) -> Option<SectionBounds> {
        self(id)
    }
}

impl SectionLayout for BTreeMap<SectionId, SectionBounds> {
    fn bounds(&self, id: &SectionId) -> Option<SectionBounds> {
        self.get(id).copied()
    }
}

impl SectionLayout for HashMap<SectionId, SectionBounds> {
    fn bounds(&self, id: &SectionId) -> Option<SectionBounds> {
        self.get(id).copied()
    }
}

/// Scroll spy configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Height of the sticky nav bar, added to the scroll offset.
    /// Default: 100.0 px
    pub nav_offset: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self { nav_offset: 100.0 }
    }
}

/// Rejected section list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// The section list was empty.
    NoSections,
    /// A section id was listed twice.
    DuplicateSection(SectionId),
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSections => f.write_str("scroll spy needs at least one section"),
            Self::DuplicateSection(id) => write!(f, "section `{id}` listed twice"),
        }
    }
}

impl std::error::Error for TrackerError {}

/// Owner of the active section.
#[derive(Debug, Clone)]
pub struct ActiveSectionTracker {
    sections: Vec<SectionId>,
    config: TrackerConfig,
    active: Option<usize>,
    connected: bool,
}

impl ActiveSectionTracker {
    /// Track the given sections, in priority order.
    ///
    /// # Errors
    ///
    /// [`TrackerError::NoSections`] for an empty list,
    /// [`TrackerError::DuplicateSection`] for a repeated id.
    pub fn new(sections: Vec<SectionId>, config: TrackerConfig) -> Result<Self, TrackerError> {
        if sections.is_empty() {
            return Err(TrackerError::NoSections);
        }
        for (i, id) in sections.iter().enumerate() {
            if sections[..i].contains(id) {
                return Err(TrackerError::DuplicateSection(id.clone()));
            }
        }
        Ok(Self {
            sections,
            config,
            active: None,
            connected: false,
        })
    }

    /// Start tracking: the first section becomes active, then a scan runs
    /// for the current offset. Calling again rescans without resetting.
    pub fn activate(&mut self, scroll_offset: f64, layout: &dyn SectionLayout) -> &SectionId {
        if self.active.is_none() {
            self.active = Some(0);
        }
        self.connected = true;
        tracing::debug!(sections = self.sections.len(), "scroll spy activated");
        self.on_scroll(scroll_offset, layout);
        self.current_or_first()
    }

    /// Rescan after a scroll event. Returns `true` if the active section
    /// changed. Ignored before activation and after disconnect.
    pub fn on_scroll(&mut self, scroll_offset: f64, layout: &dyn SectionLayout) -> bool {
        if !self.connected {
            return false;
        }
        let marker = scroll_offset + self.config.nav_offset;
        let hit = self
            .sections
            .iter()
            .position(|id| layout.bounds(id).is_some_and(|b| b.contains(marker)));
        match hit {
            Some(idx) if self.active != Some(idx) => {
                self.active = Some(idx);
                tracing::debug!(section = %self.sections[idx], marker, "active section changed");
                true
            }
            _ => false,
        }
    }

    /// Stop reacting to scroll events; the last active section is kept.
    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    /// The highlighted section, once activated.
    #[must_use]
    pub fn active(&self) -> Option<&SectionId> {
        self.active.map(|idx| &self.sections[idx])
    }

    /// Whether scroll events are being processed.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Tracked sections in priority order.
    #[must_use]
    pub fn sections(&self) -> &[SectionId] {
        &self.sections
    }

    fn current_or_first(&self) -> &SectionId {
        &self.sections[self.active.unwrap_or(0)]
    }
}
