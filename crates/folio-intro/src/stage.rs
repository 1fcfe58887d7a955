#![forbid(unsafe_code)]

//! Intro stages and timeline cues.

use std::fmt;

/// One discrete step of the intro presentation, in presentation order.
///
/// The derived ordering is the presentation order; the sequencer only ever
/// moves forward through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnimationStage {
    /// Word cloud on screen, skip button available, scrolling suppressed.
    Loading,
    /// Word cloud fading out, skip button sliding away.
    FadingOut,
    /// Loading overlay gone; nav bar and page content mounted, scrolling restored.
    Complete,
    /// Full name slid out from the monogram.
    NameRevealed,
    /// Tagline typewriter running.
    TypingShown,
    /// Social links shown. Terminal.
    SocialsShown,
}

impl AnimationStage {
    /// Every stage in presentation order.
    pub const ALL: [Self; 6] = [
        Self::Loading,
        Self::FadingOut,
        Self::Complete,
        Self::NameRevealed,
        Self::TypingShown,
        Self::SocialsShown,
    ];

    /// Stable lowercase name, used in traces and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::FadingOut => "fading_out",
            Self::Complete => "complete",
            Self::NameRevealed => "name_revealed",
            Self::TypingShown => "typing_shown",
            Self::SocialsShown => "socials_shown",
        }
    }

    /// The stage after this one, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Loading => Some(Self::FadingOut),
            Self::FadingOut => Some(Self::Complete),
            Self::Complete => Some(Self::NameRevealed),
            Self::NameRevealed => Some(Self::TypingShown),
            Self::TypingShown => Some(Self::SocialsShown),
            Self::SocialsShown => None,
        }
    }

    /// Whether no further stage can follow.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::SocialsShown)
    }

    /// Whether page scrolling is suppressed while in this stage.
    #[must_use]
    pub const fn suppresses_scroll(self) -> bool {
        matches!(self, Self::Loading | Self::FadingOut)
    }
}

impl fmt::Display for AnimationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entry of the intro timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Move to the given stage.
    Advance(AnimationStage),
    /// Crossfade the revealed name into its gradient layer. Decorative only;
    /// it does not change the stage.
    Aurora,
}

impl Cue {
    /// The stage this cue advances to, if it is a stage cue.
    #[must_use]
    pub const fn stage(self) -> Option<AnimationStage> {
        match self {
            Self::Advance(stage) => Some(stage),
            Self::Aurora => None,
        }
    }

    /// Stable lowercase name, used in traces and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Advance(stage) => stage.as_str(),
            Self::Aurora => "aurora",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
