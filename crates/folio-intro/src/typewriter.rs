#![forbid(unsafe_code)]

//! Typewriter effect for the intro tagline.
//!
//! Text is revealed one grapheme cluster per `type_speed`, so emoji and
//! combining sequences never show up half-typed. A caret blinks alongside
//! and keeps blinking after the text is complete.

use std::time::Duration;

use folio_core::animation::{Animation, Pulse};
use unicode_segmentation::UnicodeSegmentation;

/// Typewriter timing and caret options.
#[derive(Debug, Clone, PartialEq)]
pub struct TypewriterConfig {
    /// Time per grapheme.
    /// Default: 80ms
    pub type_speed: Duration,
    /// Whether a caret is drawn at all.
    pub show_caret: bool,
    /// Whether the caret blinks (otherwise it stays solid).
    pub blink_caret: bool,
    /// One full caret on/off cycle.
    /// Default: 1s
    pub blink_period: Duration,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            type_speed: Duration::from_millis(80),
            show_caret: true,
            blink_caret: true,
            blink_period: Duration::from_secs(1),
        }
    }
}

/// Grapheme-accurate typewriter.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    /// Byte offset of the end of each grapheme.
    ends: Vec<usize>,
    elapsed: Duration,
    caret: Pulse,
    config: TypewriterConfig,
}

impl Typewriter {
    /// Prepare `text` for typing; nothing is visible yet.
    #[must_use]
    pub fn new(text: impl Into<String>, config: TypewriterConfig) -> Self {
        let text = text.into();
        let ends = text
            .grapheme_indices(true)
            .map(|(start, g)| start + g.len())
            .collect();
        Self {
            text,
            ends,
            elapsed: Duration::ZERO,
            caret: Pulse::new(config.blink_period),
            config,
        }
    }

    /// Number of graphemes typed so far.
    #[must_use]
    pub fn typed(&self) -> usize {
        if self.config.type_speed.is_zero() {
            return self.ends.len();
        }
        let steps = self.elapsed.as_nanos() / self.config.type_speed.as_nanos();
        usize::try_from(steps).unwrap_or(usize::MAX).min(self.ends.len())
    }

    /// Total graphemes in the text.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    /// Whether the text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// The prefix currently on screen.
    #[must_use]
    pub fn visible_text(&self) -> &str {
        match self.typed() {
            0 => "",
            n => &self.text[..self.ends[n - 1]],
        }
    }

    /// Full text.
    #[must_use]
    pub fn full_text(&self) -> &str {
        &self.text
    }

    /// Whether the caret is drawn this frame.
    #[must_use]
    pub fn caret_visible(&self) -> bool {
        self.config.show_caret && (!self.config.blink_caret || self.caret.value() >= 0.5)
    }
}

impl Animation for Typewriter {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.caret.tick(dt);
    }

    fn is_complete(&self) -> bool {
        self.typed() == self.ends.len()
    }

    fn value(&self) -> f32 {
        if self.ends.is_empty() {
            return 1.0;
        }
        self.typed() as f32 / self.ends.len() as f32
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.caret.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_80: Duration = Duration::from_millis(80);

    #[test]
    fn nothing_typed_at_start() {
        let tw = Typewriter::new("hello", TypewriterConfig::default());
        assert_eq!(tw.visible_text(), "");
        assert!(!tw.is_complete());
    }

    #[test]
    fn one_grapheme_per_interval() {
        let mut tw = Typewriter::new("hello", TypewriterConfig::default());
        tw.tick(MS_80);
        assert_eq!(tw.visible_text(), "h");
        tw.tick(MS_80 * 2);
        assert_eq!(tw.visible_text(), "hel");
        tw.tick(Duration::from_secs(1));
        assert_eq!(tw.visible_text(), "hello");
        assert!(tw.is_complete());
        assert!((tw.value() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn clusters_are_never_split() {
        // "e" + combining acute, then a family emoji joined by ZWJ.
        let text = "e\u{301}\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}!";
        let mut tw = Typewriter::new(text, TypewriterConfig::default());
        assert_eq!(tw.len(), 3);
        tw.tick(MS_80);
        assert_eq!(tw.visible_text(), "e\u{301}");
        tw.tick(MS_80);
        assert_eq!(
            tw.visible_text(),
            "e\u{301}\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}"
        );
    }

    #[test]
    fn caret_blinks_and_keeps_blinking() {
        let mut tw = Typewriter::new("hi", TypewriterConfig::default());
        assert!(tw.caret_visible());
        tw.tick(Duration::from_millis(500));
        assert!(!tw.caret_visible());
        tw.tick(Duration::from_millis(500));
        assert!(tw.is_complete());
        assert!(tw.caret_visible());
    }

    #[test]
    fn solid_and_hidden_carets() {
        let solid = TypewriterConfig {
            blink_caret: false,
            ..TypewriterConfig::default()
        };
        let mut tw = Typewriter::new("hi", solid);
        tw.tick(Duration::from_millis(500));
        assert!(tw.caret_visible());

        let hidden = TypewriterConfig {
            show_caret: false,
            ..TypewriterConfig::default()
        };
        assert!(!Typewriter::new("hi", hidden).caret_visible());
    }

    #[test]
    fn empty_text_is_complete() {
        let tw = Typewriter::new("", TypewriterConfig::default());
        assert!(tw.is_empty());
        assert!(tw.is_complete());
        assert_eq!(tw.visible_text(), "");
    }
}
