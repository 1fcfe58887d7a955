#![forbid(unsafe_code)]

//! Background word cloud shown while the intro is loading.
//!
//! Each word gets a random size, drift offset and position, plus a fade-in
//! delay that grows linearly with its index. The random parameters are drawn
//! once, on the first client render, and then reused for every later render
//! of the same mount so the cloud does not jump around.

use std::cell::OnceCell;
use std::fmt::Write as _;
use std::time::Duration;

use folio_core::animation::stagger_offsets;
use folio_core::rng::XorShift64;

/// Technology words floating behind the monogram.
pub const LOADING_WORDS: [&str; 50] = [
    "React",
    "TypeScript",
    "Next.js",
    "JavaScript",
    "CSS",
    "HTML",
    "Node.js",
    "Git",
    "Tailwind",
    "UI/UX",
    "Design",
    "Frontend",
    "Backend",
    "API",
    "Database",
    "MongoDB",
    "PostgreSQL",
    "Python",
    "Java",
    "Docker",
    "AWS",
    "Firebase",
    "Vercel",
    "GraphQL",
    "REST",
    "Responsive",
    "Animation",
    "Performance",
    "SEO",
    "Testing",
    "Agile",
    "Scrum",
    "CI/CD",
    "DevOps",
    "Security",
    "Accessibility",
    "Redux",
    "Context",
    "Hooks",
    "Components",
    "State",
    "Props",
    "Async",
    "Promise",
    "OAuth",
    "JWT",
    "Webpack",
    "Vite",
    "npm",
    "yarn",
];

/// Word cloud generation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct WordCloudConfig {
    /// Seed for the decorative generator. Hosts pass something
    /// per-page-load (e.g. a timestamp); tests pass a constant.
    /// Default: 0, which gives the same layout on every load.
    pub seed: u64,
    /// Extra fade-in delay per word index.
    /// Default: 50ms
    pub stagger: Duration,
    /// Font size range in vmin, half-open.
    /// Default: 4.0..6.0
    pub font_vmin: (f32, f32),
    /// Drift animation offset range in seconds, half-open.
    /// Default: -4.0..0.0
    pub drift_secs: (f32, f32),
    /// Left/top position range in percent, half-open.
    /// Default: 20.0..80.0
    pub position_pct: (f32, f32),
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            stagger: Duration::from_millis(50),
            font_vmin: (4.0, 6.0),
            drift_secs: (-4.0, 0.0),
            position_pct: (20.0, 80.0),
        }
    }
}

impl WordCloudConfig {
    /// Set the generator seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Presentation parameters of one word.
#[derive(Debug, Clone, PartialEq)]
pub struct WordStyle {
    /// The word.
    pub word: &'static str,
    /// Font size in vmin.
    pub font_vmin: f32,
    /// Drift animation delay in seconds (negative starts mid-cycle).
    pub drift_delay_secs: f32,
    /// Fade-in delay: `index * stagger`.
    pub fade_in_delay: Duration,
    /// Horizontal position in percent.
    pub left_pct: f32,
    /// Vertical position in percent.
    pub top_pct: f32,
}

impl WordStyle {
    /// Inline CSS for the word element.
    #[must_use]
    pub fn inline_css(&self) -> String {
        let mut css = String::with_capacity(96);
        let _ = write!(
            css,
            "font-size: {:.2}vmin; left: {:.2}%; top: {:.2}%; animation-delay: {}s, {:.2}s",
            self.font_vmin,
            self.left_pct,
            self.top_pct,
            self.fade_in_delay.as_secs_f32(),
            self.drift_delay_secs,
        );
        css
    }
}

/// Lazily generated, then frozen, word cloud.
#[derive(Debug)]
pub struct WordCloud {
    config: WordCloudConfig,
    styles: OnceCell<Vec<WordStyle>>,
}

impl WordCloud {
    /// Create an ungenerated cloud.
    #[must_use]
    pub fn new(config: WordCloudConfig) -> Self {
        Self {
            config,
            styles: OnceCell::new(),
        }
    }

    /// Styles for every word, generating them on first call.
    pub fn styles(&self) -> &[WordStyle] {
        self.styles.get_or_init(|| {
            tracing::debug!(
                seed = self.config.seed,
                words = LOADING_WORDS.len(),
                "word cloud generated"
            );
            generate(&self.config)
        })
    }

    /// Styles if already generated. Server-side renders use this and emit
    /// nothing until the client has generated the cloud.
    #[must_use]
    pub fn peek(&self) -> Option<&[WordStyle]> {
        self.styles.get().map(Vec::as_slice)
    }

    /// Whether the random parameters have been drawn.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.styles.get().is_some()
    }
}

fn generate(config: &WordCloudConfig) -> Vec<WordStyle> {
    let mut rng = XorShift64::new(config.seed);
    let delays = stagger_offsets(LOADING_WORDS.len(), config.stagger);
    LOADING_WORDS
        .iter()
        .zip(delays)
        .map(|(&word, fade_in_delay)| WordStyle {
            word,
            font_vmin: rng.range_f32(config.font_vmin.0, config.font_vmin.1),
            drift_delay_secs: rng.range_f32(config.drift_secs.0, config.drift_secs.1),
            fade_in_delay,
            left_pct: rng.range_f32(config.position_pct.0, config.position_pct.1),
            top_pct: rng.range_f32(config.position_pct.0, config.position_pct.1),
        })
        .collect()
}
