#![forbid(unsafe_code)]

//! Web: the host-driven portfolio page.
//!
//! Composes `folio-intro` (loading → name → typing → socials) with
//! `folio-tracker` (scroll spy, reveal-on-scroll, copy notifications) behind
//! a single [`PageView`]. The browser shim implements [`Host`] and calls
//! into the view from its event handlers and `requestAnimationFrame`.
//!
//! # Where to look
//! - [`page`]: the view and its lifecycle.
//! - [`site`]: section ids, nav items and social links.
//! - [`trace`]: JSONL trace of applied intro cues.

pub mod page;
pub mod site;
pub mod trace;

pub use page::{FrameReport, Host, PageConfig, PageError, PageView};
pub use site::{NavLink, NavTarget, Site, SocialKind, SocialLink};
pub use trace::{IntroTrace, SCHEMA_VERSION, TraceParseError, TraceRecord};

#[cfg(feature = "tracing-json")]
pub use folio_core::logging::init_json;
