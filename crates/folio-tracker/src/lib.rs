#![forbid(unsafe_code)]

//! Tracker: scroll spy, reveal-on-scroll, and copy notifications.
//!
//! The two observers are independent units: [`ActiveSectionTracker`] maps a
//! scroll offset to the highlighted nav item, [`RevealTracker`] turns
//! intersection entries into the add-only [`RevealSet`]. The page activates
//! both once the intro reaches `Complete` and disconnects both on teardown.

pub mod active_section;
pub mod clipboard;
pub mod id;
pub mod image;
pub mod reveal;

pub use active_section::{
    ActiveSectionTracker, SectionBounds, SectionLayout, TrackerConfig, TrackerError,
};
pub use clipboard::{
    Clipboard, ClipboardError, CopyNotifier, NoticeKind, Notification, NotifierConfig,
};
pub use id::{ElementId, SectionId};
pub use image::ImageSlot;
pub use reveal::{RevealConfig, RevealSet, RevealTracker};
