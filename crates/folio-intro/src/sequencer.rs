#![forbid(unsafe_code)]

//! The intro sequencer.
//!
//! [`IntroSequencer`] owns the intro stage, the timers that advance it and
//! the scroll lock held until `Complete`. It consumes one [`Timeline`] at a
//! time: `start()` drives the autoplay table, `skip()` cancels whatever is
//! pending and resumes the skip table at the first cue not yet applied.
//!
//! The host pushes time in with [`advance_to`](IntroSequencer::advance_to);
//! due cues are applied in deadline order and each applied cue schedules the
//! next row relative to its own deadline, so coarse host frames never change
//! the spacing between stages.
//!
//! # Invariants
//!
//! 1. The stage never regresses and never skips a stage.
//! 2. At most one timer is pending at any time; a second `start()` is a no-op.
//! 3. Autoplay and skip end in the same state: `SocialsShown` with the aurora
//!    layer shown.
//! 4. After [`teardown`](IntroSequencer::teardown) no timer can fire and
//!    scrolling has been restored.

use std::rc::Rc;
use std::time::Duration;

use folio_core::animation::{Animation, Easing, Fade};
use folio_core::timer::TimerQueue;

use crate::scroll_lock::{ScrollControl, ScrollLock};
use crate::stage::{AnimationStage, Cue};
use crate::timeline::Timeline;

/// Which table is driving the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimelineMode {
    /// Mounted, nothing scheduled yet.
    Idle,
    /// Timer-driven autoplay.
    Autoplay,
    /// Compressed table after a user skip.
    Skip,
}

impl TimelineMode {
    /// Stable lowercase name, used in traces and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Autoplay => "autoplay",
            Self::Skip => "skip",
        }
    }
}

/// Intro configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct IntroConfig {
    /// Table used by [`IntroSequencer::start`].
    pub autoplay: Timeline,
    /// Table used by [`IntroSequencer::skip`].
    pub skip: Timeline,
    /// Length of the white-to-gradient name crossfade.
    /// Default: 1000ms
    pub aurora_fade: Duration,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            autoplay: Timeline::autoplay(),
            skip: Timeline::skip(),
            aurora_fade: Duration::from_millis(1000),
        }
    }
}

impl IntroConfig {
    /// Replace the autoplay table.
    #[must_use]
    pub fn with_autoplay(mut self, timeline: Timeline) -> Self {
        self.autoplay = timeline;
        self
    }

    /// Replace the skip table.
    #[must_use]
    pub fn with_skip(mut self, timeline: Timeline) -> Self {
        self.skip = timeline;
        self
    }

    /// Set the aurora crossfade length.
    #[must_use]
    pub fn with_aurora_fade(mut self, fade: Duration) -> Self {
        self.aurora_fade = fade;
        self
    }
}

/// A cue that was applied, with the instant it was due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Host time (since mount) the cue was due.
    pub at: Duration,
    /// Applied cue.
    pub cue: Cue,
    /// Table that scheduled it.
    pub mode: TimelineMode,
}

/// Skip button presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipButton {
    /// Clickable.
    Visible,
    /// Animating away while the loading overlay fades.
    SlidingOut,
    /// Unmounted.
    Hidden,
}

/// Instance-owned intro state machine.
#[derive(Debug)]
pub struct IntroSequencer {
    config: IntroConfig,
    stage: AnimationStage,
    aurora_shown: bool,
    mode: TimelineMode,
    /// Payload is the row index in the active table.
    timers: TimerQueue<usize>,
    now: Duration,
    fade_out: Option<Fade>,
    aurora: Option<Fade>,
    scroll_lock: Option<ScrollLock>,
    transitions: Vec<Transition>,
    torn_down: bool,
}

impl IntroSequencer {
    /// Mount the intro in `Loading` and suppress scrolling on `surface`.
    #[must_use]
    pub fn new(config: IntroConfig, surface: Rc<dyn ScrollControl>) -> Self {
        Self {
            config,
            stage: AnimationStage::Loading,
            aurora_shown: false,
            mode: TimelineMode::Idle,
            timers: TimerQueue::new(),
            now: Duration::ZERO,
            fade_out: None,
            aurora: None,
            scroll_lock: Some(ScrollLock::acquire(surface)),
            transitions: Vec::new(),
            torn_down: false,
        }
    }

    /// Begin autoplay. Returns `false` (and does nothing) if the timeline
    /// already started, was skipped, or the sequencer was torn down.
    pub fn start(&mut self) -> bool {
        if self.torn_down || self.mode != TimelineMode::Idle {
            return false;
        }
        self.mode = TimelineMode::Autoplay;
        tracing::info!("intro autoplay started");
        self.schedule_row(0, self.now);
        self.advance_to(self.now);
        true
    }

    /// Fast-forward: cancel pending autoplay timers and continue with the
    /// skip table from the first cue not yet applied.
    ///
    /// A zero-delay first row (the fade-out) is applied before this returns.
    /// Returns `false` when there is nothing left to skip.
    pub fn skip(&mut self) -> bool {
        if self.torn_down || self.mode == TimelineMode::Skip || self.is_finished() {
            return false;
        }
        let dropped = self.timers.cancel_all();
        self.mode = TimelineMode::Skip;
        let resume = self
            .config
            .skip
            .steps()
            .iter()
            .position(|row| !self.is_applied(row.cue));
        tracing::info!(stage = %self.stage, dropped, resume = ?resume, "intro skipped");
        if let Some(idx) = resume {
            self.schedule_row(idx, self.now);
            self.advance_to(self.now);
        }
        true
    }

    /// Feed host time (since mount). Applies every cue due at or before
    /// `now` and advances the running fades. Returns how many cues were
    /// applied. Time that runs backwards is ignored.
    pub fn advance_to(&mut self, now: Duration) -> usize {
        if self.torn_down || now < self.now {
            return 0;
        }
        let mut applied = 0;
        while let Some(fired) = self.timers.pop_due(now) {
            let at = fired.deadline.max(self.now);
            self.tick_animations(at - self.now);
            self.now = at;
            if self.apply_row(fired.payload) {
                applied += 1;
            }
        }
        self.tick_animations(now - self.now);
        self.now = now;
        applied
    }

    /// Cancel every timer, restore scrolling and freeze the stage.
    ///
    /// Idempotent; also runs on drop.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        let dropped = self.timers.close();
        self.scroll_lock = None;
        tracing::info!(stage = %self.stage, dropped, "intro torn down");
    }

    /// Take the cues applied since the last call, in order.
    pub fn drain_transitions(&mut self) -> Vec<Transition> {
        std::mem::take(&mut self.transitions)
    }

    // ---- observation --------------------------------------------------

    /// Current stage.
    #[must_use]
    pub fn stage(&self) -> AnimationStage {
        self.stage
    }

    /// Table currently driving the sequencer.
    #[must_use]
    pub fn mode(&self) -> TimelineMode {
        self.mode
    }

    /// Last host time seen.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Whether the loading phase is over (nav and content mounted).
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.stage >= AnimationStage::Complete
    }

    /// Whether every cue, including the aurora, has been applied.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.stage.is_terminal() && self.aurora_shown
    }

    /// Whether [`teardown`](Self::teardown) has run.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Whether this instance still suppresses page scrolling.
    #[must_use]
    pub fn scroll_locked(&self) -> bool {
        self.scroll_lock.as_ref().is_some_and(ScrollLock::is_held)
    }

    /// Number of timers waiting to fire (0 or 1).
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.pending_count()
    }

    /// When the next cue is due, if one is scheduled.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Whether the aurora cue has been applied.
    #[must_use]
    pub fn aurora_shown(&self) -> bool {
        self.aurora_shown
    }

    /// Opacity of the loading word cloud overlay.
    #[must_use]
    pub fn loading_overlay_opacity(&self) -> f32 {
        match self.stage {
            AnimationStage::Loading => 1.0,
            AnimationStage::FadingOut => {
                1.0 - self.fade_out.as_ref().map_or(0.0, Animation::value)
            }
            _ => 0.0,
        }
    }

    /// `(white, gradient)` opacities of the two name layers.
    #[must_use]
    pub fn name_layer_opacities(&self) -> (f32, f32) {
        let v = self.aurora.as_ref().map_or(0.0, Animation::value);
        (1.0 - v, v)
    }

    /// Skip button presentation for the current stage.
    #[must_use]
    pub fn skip_button(&self) -> SkipButton {
        match self.stage {
            AnimationStage::Loading => SkipButton::Visible,
            AnimationStage::FadingOut => SkipButton::SlidingOut,
            _ => SkipButton::Hidden,
        }
    }

    // ---- driver -------------------------------------------------------

    fn table(&self) -> &Timeline {
        match self.mode {
            TimelineMode::Skip => &self.config.skip,
            TimelineMode::Idle | TimelineMode::Autoplay => &self.config.autoplay,
        }
    }

    fn is_applied(&self, cue: Cue) -> bool {
        match cue {
            Cue::Advance(stage) => stage <= self.stage,
            Cue::Aurora => self.aurora_shown,
        }
    }

    fn schedule_row(&mut self, idx: usize, from: Duration) {
        if let Some(row) = self.table().get(idx).copied() {
            self.timers.schedule(from, row.delay, idx);
        }
    }

    /// Apply row `idx` of the active table and schedule the next one.
    /// Returns `false` if the cue had already been applied.
    fn apply_row(&mut self, idx: usize) -> bool {
        let Some(row) = self.table().get(idx).copied() else {
            return false;
        };
        let fresh = !self.is_applied(row.cue);
        if fresh {
            match row.cue {
                Cue::Advance(stage) => self.enter_stage(stage),
                Cue::Aurora => {
                    self.aurora_shown = true;
                    let fade = Fade::new(self.config.aurora_fade).with_easing(Easing::EaseInOut);
                    self.aurora = Some(fade);
                }
            }
            tracing::debug!(
                cue = %row.cue,
                at_ms = self.now.as_millis() as u64,
                mode = self.mode.as_str(),
                "intro cue applied"
            );
            self.transitions.push(Transition {
                at: self.now,
                cue: row.cue,
                mode: self.mode,
            });
        }
        self.schedule_row(idx + 1, self.now);
        fresh
    }

    fn enter_stage(&mut self, stage: AnimationStage) {
        debug_assert_eq!(self.stage.next(), Some(stage), "stage skipped or repeated");
        self.stage = stage;
        match stage {
            AnimationStage::FadingOut => {
                let length = self.table().fade_out_duration();
                self.fade_out = Some(Fade::new(length).with_easing(Easing::EaseOut));
            }
            AnimationStage::Complete => {
                self.fade_out = None;
                self.scroll_lock = None;
            }
            _ => {}
        }
    }

    fn tick_animations(&mut self, dt: Duration) {
        if dt.is_zero() {
            return;
        }
        if let Some(fade) = self.fade_out.as_mut() {
            fade.tick(dt);
        }
        if let Some(fade) = self.aurora.as_mut() {
            fade.tick(dt);
        }
    }
}

impl Drop for IntroSequencer {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Body {
        calls: RefCell<Vec<bool>>,
    }

    impl ScrollControl for Body {
        fn set_scroll_enabled(&self, enabled: bool) {
            self.calls.borrow_mut().push(enabled);
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn mount() -> (IntroSequencer, Rc<Body>) {
        let body = Rc::new(Body::default());
        let seq = IntroSequencer::new(IntroConfig::default(), body.clone());
        (seq, body)
    }

    fn stages(transitions: &[Transition]) -> Vec<AnimationStage> {
        transitions.iter().filter_map(|t| t.cue.stage()).collect()
    }

    #[test]
    fn mount_locks_scroll_in_loading() {
        let (seq, body) = mount();
        assert_eq!(seq.stage(), AnimationStage::Loading);
        assert!(seq.scroll_locked());
        assert_eq!(*body.calls.borrow(), vec![false]);
        assert_eq!(seq.pending_timers(), 0);
    }

    #[test]
    fn nothing_happens_before_start() {
        let (mut seq, _) = mount();
        assert_eq!(seq.advance_to(Duration::from_secs(60)), 0);
        assert_eq!(seq.stage(), AnimationStage::Loading);
    }

    #[test]
    fn autoplay_hits_each_stage_on_schedule() {
        let (mut seq, _) = mount();
        assert!(seq.start());
        seq.advance_to(ms(4999));
        assert_eq!(seq.stage(), AnimationStage::Loading);
        seq.advance_to(ms(5000));
        assert_eq!(seq.stage(), AnimationStage::FadingOut);
        seq.advance_to(ms(6500));
        assert_eq!(seq.stage(), AnimationStage::Complete);
        seq.advance_to(ms(7300));
        assert_eq!(seq.stage(), AnimationStage::NameRevealed);
        seq.advance_to(ms(9300));
        assert!(seq.aurora_shown());
        seq.advance_to(ms(10_300));
        assert_eq!(seq.stage(), AnimationStage::TypingShown);
        seq.advance_to(ms(11_800));
        assert_eq!(seq.stage(), AnimationStage::SocialsShown);
        assert!(seq.is_finished());
        assert_eq!(seq.pending_timers(), 0);
    }

    #[test]
    fn one_large_jump_applies_everything_in_order() {
        let (mut seq, _) = mount();
        seq.start();
        assert_eq!(seq.advance_to(Duration::from_secs(30)), 6);
        let transitions = seq.drain_transitions();
        assert_eq!(stages(&transitions), AnimationStage::ALL[1..].to_vec());
        let at: Vec<u128> = transitions.iter().map(|t| t.at.as_millis()).collect();
        assert_eq!(at, vec![5000, 6500, 7300, 9300, 10_300, 11_800]);
    }

    #[test]
    fn second_start_is_a_no_op() {
        let (mut seq, _) = mount();
        assert!(seq.start());
        assert!(!seq.start());
        assert_eq!(seq.pending_timers(), 1);
        seq.advance_to(Duration::from_secs(30));
        assert_eq!(seq.drain_transitions().len(), 6);
    }

    #[test]
    fn scroll_restored_at_complete() {
        let (mut seq, body) = mount();
        seq.start();
        seq.advance_to(ms(6499));
        assert!(seq.scroll_locked());
        seq.advance_to(ms(6500));
        assert!(!seq.scroll_locked());
        assert_eq!(*body.calls.borrow(), vec![false, true]);
    }

    #[test]
    fn skip_fades_immediately_then_compresses() {
        let (mut seq, _) = mount();
        seq.start();
        seq.advance_to(ms(1000));
        assert!(seq.skip());
        assert_eq!(seq.stage(), AnimationStage::FadingOut);
        assert_eq!(seq.mode(), TimelineMode::Skip);
        assert_eq!(seq.skip_button(), SkipButton::SlidingOut);
        seq.advance_to(ms(1800));
        assert_eq!(seq.stage(), AnimationStage::Complete);
        seq.advance_to(ms(2329));
        assert!(!seq.is_finished());
        seq.advance_to(ms(2330));
        assert!(seq.is_finished());
    }

    #[test]
    fn skip_before_start_counts_as_started() {
        let (mut seq, _) = mount();
        assert!(seq.skip());
        assert!(!seq.start());
        seq.advance_to(Duration::from_secs(2));
        assert!(seq.is_finished());
    }

    #[test]
    fn skip_mid_timeline_does_not_replay_applied_cues() {
        let (mut seq, _) = mount();
        seq.start();
        seq.advance_to(ms(7300));
        let before = seq.drain_transitions();
        assert_eq!(before.len(), 3);
        assert!(seq.skip());
        seq.advance_to(ms(7300 + 450));
        let after = seq.drain_transitions();
        assert_eq!(
            after.iter().map(|t| t.cue).collect::<Vec<_>>(),
            vec![
                Cue::Aurora,
                Cue::Advance(AnimationStage::TypingShown),
                Cue::Advance(AnimationStage::SocialsShown),
            ]
        );
        assert!(after.iter().all(|t| t.mode == TimelineMode::Skip));
    }

    #[test]
    fn second_skip_and_skip_when_finished_are_no_ops() {
        let (mut seq, _) = mount();
        assert!(seq.skip());
        assert!(!seq.skip());
        seq.advance_to(Duration::from_secs(5));
        assert!(!seq.skip());
    }

    #[test]
    fn overlay_fades_during_fading_out() {
        let (mut seq, _) = mount();
        seq.start();
        assert!((seq.loading_overlay_opacity() - 1.0).abs() < f32::EPSILON);
        seq.advance_to(ms(5750));
        let mid = seq.loading_overlay_opacity();
        assert!(mid > 0.0 && mid < 1.0, "mid fade opacity {mid}");
        seq.advance_to(ms(6500));
        assert!(seq.loading_overlay_opacity().abs() < f32::EPSILON);
    }

    #[test]
    fn aurora_crossfades_name_layers() {
        let (mut seq, _) = mount();
        seq.start();
        seq.advance_to(ms(9300));
        assert_eq!(seq.name_layer_opacities(), (1.0, 0.0));
        seq.advance_to(ms(10_300));
        let (white, gradient) = seq.name_layer_opacities();
        assert!(white.abs() < f32::EPSILON);
        assert!((gradient - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn teardown_in_loading_leaves_no_live_timer() {
        let (mut seq, body) = mount();
        seq.start();
        seq.teardown();
        assert_eq!(seq.pending_timers(), 0);
        assert_eq!(seq.advance_to(Duration::from_secs(60)), 0);
        assert_eq!(seq.stage(), AnimationStage::Loading);
        assert!(!seq.skip());
        assert_eq!(*body.calls.borrow(), vec![false, true]);
    }

    #[test]
    fn drop_restores_scroll() {
        let (seq, body) = mount();
        drop(seq);
        assert_eq!(*body.calls.borrow(), vec![false, true]);
    }

    #[test]
    fn backwards_time_is_ignored() {
        let (mut seq, _) = mount();
        seq.start();
        seq.advance_to(ms(5000));
        assert_eq!(seq.advance_to(ms(10)), 0);
        assert_eq!(seq.now(), ms(5000));
    }
}
