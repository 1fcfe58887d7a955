#![forbid(unsafe_code)]

//! Intro: the one-shot loading → name reveal → typing → socials timeline.
//!
//! # Role in the page
//! `folio-intro` owns everything that happens before the page content is
//! interactive: the word cloud overlay, the skip button, the stage timeline
//! and the scroll lock. The page composes it with `folio-tracker` and only
//! activates the tracker once [`AnimationStage::Complete`] is reached.
//!
//! # Where to look
//! - [`sequencer`]: the stage driver (`start`, `skip`, `advance_to`, `teardown`).
//! - [`timeline`]: autoplay and skip delay tables.
//! - [`scroll_lock`]: RAII scroll suppression.
//! - [`word_cloud`], [`typewriter`]: decorative pieces.

pub mod scroll_lock;
pub mod sequencer;
pub mod stage;
pub mod timeline;
pub mod typewriter;
pub mod word_cloud;

pub use scroll_lock::{ScrollControl, ScrollLock};
pub use sequencer::{IntroConfig, IntroSequencer, SkipButton, TimelineMode, Transition};
pub use stage::{AnimationStage, Cue};
pub use timeline::{SKIP_COMPRESSION, SKIP_FADE_OUT, Timeline, TimelineError, TimelineStep};
pub use typewriter::{Typewriter, TypewriterConfig};
pub use word_cloud::{LOADING_WORDS, WordCloud, WordCloudConfig, WordStyle};
