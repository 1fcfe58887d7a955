#![forbid(unsafe_code)]

//! Intro timelines as data.
//!
//! A [`Timeline`] is an ordered table of `(cue, delay from previous cue)`
//! pairs consumed by a single driver in [`crate::sequencer`]. Autoplay and
//! skip are two tables with the same cues in the same order; only the
//! delays differ. The skip table is the autoplay table run through
//! [`Timeline::compressed`]: the fade-out starts at once and takes a fixed
//! lead-in, and every later gap keeps its autoplay proportion.
//!
//! # Invariants
//!
//! 1. Stage cues are strictly increasing and cover every stage from
//!    `FadingOut` to `SocialsShown`, exactly once each.
//! 2. `Loading` never appears as a cue; it is the initial stage.
//! 3. The aurora cue appears exactly once, after `NameRevealed`.

use std::fmt;
use std::time::Duration;

use crate::stage::{AnimationStage, Cue};

/// One row of a timeline table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineStep {
    /// What happens.
    pub cue: Cue,
    /// Wait after the previous row (or after the timeline starts).
    pub delay: Duration,
}

impl TimelineStep {
    /// Build a row from a cue and a delay in milliseconds.
    #[must_use]
    pub const fn millis(cue: Cue, delay_ms: u64) -> Self {
        Self {
            cue,
            delay: Duration::from_millis(delay_ms),
        }
    }
}

/// Rejected timeline table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    /// `Loading` was listed as a cue.
    LoadingCue,
    /// A stage cue did not come strictly after the previous stage cue.
    StageOutOfOrder {
        /// Last stage accepted.
        previous: AnimationStage,
        /// Offending stage.
        next: AnimationStage,
    },
    /// A stage between `FadingOut` and `SocialsShown` is missing.
    MissingStage(AnimationStage),
    /// The aurora cue came before `NameRevealed`.
    AuroraBeforeName,
    /// The aurora cue appeared `n` times instead of once.
    AuroraCount(usize),
}

impl fmt::Display for TimelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadingCue => f.write_str("loading is the initial stage and cannot be cued"),
            Self::StageOutOfOrder { previous, next } => {
                write!(f, "stage {next} cued after {previous}")
            }
            Self::MissingStage(stage) => write!(f, "timeline never reaches stage {stage}"),
            Self::AuroraBeforeName => f.write_str("aurora cued before name_revealed"),
            Self::AuroraCount(n) => write!(f, "aurora cued {n} times, expected once"),
        }
    }
}

impl std::error::Error for TimelineError {}

const AUTOPLAY: [TimelineStep; 6] = [
    TimelineStep::millis(Cue::Advance(AnimationStage::FadingOut), 5000),
    TimelineStep::millis(Cue::Advance(AnimationStage::Complete), 1500),
    TimelineStep::millis(Cue::Advance(AnimationStage::NameRevealed), 800),
    TimelineStep::millis(Cue::Aurora, 2000),
    TimelineStep::millis(Cue::Advance(AnimationStage::TypingShown), 1000),
    TimelineStep::millis(Cue::Advance(AnimationStage::SocialsShown), 1500),
];

/// Fade-out length on the skip path.
pub const SKIP_FADE_OUT: Duration = Duration::from_millis(800);

/// Autoplay gaps after `Complete` are divided by this on the skip path.
pub const SKIP_COMPRESSION: u32 = 10;

/// A validated intro timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    steps: Vec<TimelineStep>,
}

impl Timeline {
    /// Validate and wrap a table.
    ///
    /// # Errors
    ///
    /// Returns a [`TimelineError`] when the table would let a stage be
    /// skipped, repeated, or observed out of order.
    pub fn new(steps: Vec<TimelineStep>) -> Result<Self, TimelineError> {
        let mut current = AnimationStage::Loading;
        let mut auroras = 0;
        for step in &steps {
            match step.cue {
                Cue::Advance(AnimationStage::Loading) => return Err(TimelineError::LoadingCue),
                Cue::Advance(next) => {
                    if current.next() != Some(next) {
                        return if next <= current {
                            Err(TimelineError::StageOutOfOrder {
                                previous: current,
                                next,
                            })
                        } else {
                            // Jumped over at least one stage.
                            Err(TimelineError::MissingStage(
                                current.next().unwrap_or(AnimationStage::SocialsShown),
                            ))
                        };
                    }
                    current = next;
                }
                Cue::Aurora => {
                    if current < AnimationStage::NameRevealed {
                        return Err(TimelineError::AuroraBeforeName);
                    }
                    auroras += 1;
                }
            }
        }
        if let Some(missing) = current.next() {
            return Err(TimelineError::MissingStage(missing));
        }
        if auroras != 1 {
            return Err(TimelineError::AuroraCount(auroras));
        }
        Ok(Self { steps })
    }

    /// The timer-driven table: fade at 5 s, overlay gone at 6.5 s, then
    /// name, aurora, typing and socials.
    #[must_use]
    pub fn autoplay() -> Self {
        Self {
            steps: AUTOPLAY.to_vec(),
        }
    }

    /// The compressed table used after the user presses skip:
    /// [`Timeline::autoplay`] through [`Timeline::compressed`] with
    /// [`SKIP_FADE_OUT`] and [`SKIP_COMPRESSION`].
    #[must_use]
    pub fn skip() -> Self {
        Self::compressed(&Self::autoplay(), SKIP_FADE_OUT, SKIP_COMPRESSION)
    }

    /// Derive a faster table from `source`.
    ///
    /// `FadingOut` fires immediately and `Complete` follows after
    /// `fade_out`. Every other row keeps its cue and has its delay divided
    /// by `divisor`, so the gaps after the overlay is gone keep their
    /// ratios. A zero divisor is treated as 1.
    #[must_use]
    pub fn compressed(source: &Timeline, fade_out: Duration, divisor: u32) -> Self {
        let divisor = divisor.max(1);
        let steps = source
            .steps
            .iter()
            .map(|row| {
                let delay = match row.cue {
                    Cue::Advance(AnimationStage::FadingOut) => Duration::ZERO,
                    Cue::Advance(AnimationStage::Complete) => fade_out,
                    _ => row.delay / divisor,
                };
                TimelineStep {
                    cue: row.cue,
                    delay,
                }
            })
            .collect();
        // Same cues in the same order, so `source`'s validation still holds.
        Self { steps }
    }

    /// Rows in order.
    #[must_use]
    pub fn steps(&self) -> &[TimelineStep] {
        &self.steps
    }

    /// Row at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TimelineStep> {
        self.steps.get(index)
    }

    /// Index of `cue` in the table.
    #[must_use]
    pub fn position(&self, cue: Cue) -> Option<usize> {
        self.steps.iter().position(|s| s.cue == cue)
    }

    /// Time from the timeline start until `cue` fires.
    #[must_use]
    pub fn offset_of(&self, cue: Cue) -> Option<Duration> {
        let idx = self.position(cue)?;
        Some(self.steps[..=idx].iter().map(|s| s.delay).sum())
    }

    /// Time from the timeline start until the last cue fires.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.steps.iter().map(|s| s.delay).sum()
    }

    /// Delay between `FadingOut` and `Complete`, i.e. the fade-out length.
    #[must_use]
    pub fn fade_out_duration(&self) -> Duration {
        self.position(Cue::Advance(AnimationStage::Complete))
            .map(|idx| self.steps[idx].delay)
            .unwrap_or_default()
    }
}
