#![forbid(unsafe_code)]

//! Host-ticked animation primitives.
//!
//! Every value here is a pure function of the accumulated host deltas: no
//! wall clock, no float accumulators. Replaying a page with the same frame
//! deltas reproduces the same opacities bit for bit.
//!
//! - [`Fade`]: one-shot 0 → 1 over a fixed length (overlay fade-out, aurora
//!   crossfade).
//! - [`Pulse`]: endless 1 → 0 → 1 wave (typewriter caret).
//! - [`stagger_offsets`]: entrance delays for a list (word cloud).

pub mod stagger;

use std::f32::consts::TAU;
use std::time::Duration;

pub use stagger::stagger_offsets;

/// Shape applied to linear progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity.
    #[default]
    Linear,
    /// Quadratic, decelerating.
    EaseOut,
    /// Quadratic, accelerating then decelerating.
    EaseInOut,
}

impl Easing {
    /// Map `t` to eased output. Input is clamped to [0, 1]; both ends are
    /// fixed points.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => {
                let rest = 1.0 - t;
                1.0 - rest * rest
            }
            Self::EaseInOut if t < 0.5 => 2.0 * t * t,
            Self::EaseInOut => {
                let rest = 2.0 - 2.0 * t;
                1.0 - rest * rest / 2.0
            }
        }
    }
}

/// Something that moves with host time and reads out a value in [0.0, 1.0].
///
/// Implemented by [`Fade`], [`Pulse`], and the intro typewriter.
pub trait Animation {
    /// Move forward by a host-supplied `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether further ticks can still change [`value`](Animation::value).
    fn is_complete(&self) -> bool;

    /// Current output in [0.0, 1.0].
    fn value(&self) -> f32;

    /// Back to the state right after construction.
    fn reset(&mut self);
}

/// One-shot eased progress from 0.0 to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    length: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl Fade {
    /// A linear fade over `length`. A zero length completes on the first
    /// tick.
    #[must_use]
    pub fn new(length: Duration) -> Self {
        Self {
            length,
            elapsed: Duration::ZERO,
            easing: Easing::Linear,
        }
    }

    /// Use `easing` instead of linear.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Configured length.
    #[must_use]
    pub fn length(&self) -> Duration {
        self.length
    }

    /// Un-eased progress in [0.0, 1.0].
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.elapsed >= self.length {
            return if self.length.is_zero() && self.elapsed.is_zero() {
                0.0
            } else {
                1.0
            };
        }
        (self.elapsed.as_nanos() as f64 / self.length.as_nanos() as f64) as f32
    }
}

impl Animation for Fade {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }

    fn value(&self) -> f32 {
        self.easing.apply(self.progress())
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

/// Endless cosine wave with a fixed period, starting at its crest.
///
/// The position inside the current period is kept as a [`Duration`], so
/// hours of ticking do not drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    period: Duration,
    offset: Duration,
}

impl Pulse {
    /// One full crest-trough-crest cycle every `period`.
    ///
    /// A zero period is treated as 1ns.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_nanos(1)),
            offset: Duration::ZERO,
        }
    }

    /// Position inside the current period.
    #[must_use]
    pub fn offset(&self) -> Duration {
        self.offset
    }
}

impl Animation for Pulse {
    fn tick(&mut self, dt: Duration) {
        let period = self.period.as_nanos();
        let wrapped = (self.offset.as_nanos() + dt.as_nanos() % period) % period;
        // `wrapped < period`, which itself came from a Duration.
        self.offset = Duration::from_nanos(u64::try_from(wrapped).unwrap_or(0));
    }

    fn is_complete(&self) -> bool {
        false
    }

    fn value(&self) -> f32 {
        let frac = self.offset.as_nanos() as f64 / self.period.as_nanos() as f64;
        ((TAU * frac as f32).cos() + 1.0) / 2.0
    }

    fn reset(&mut self) {
        self.offset = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn easings_pin_both_ends() {
        for easing in [Easing::Linear, Easing::EaseOut, Easing::EaseInOut] {
            assert!(close(easing.apply(0.0), 0.0));
            assert!(close(easing.apply(1.0), 1.0));
            assert!(close(easing.apply(-3.0), 0.0));
            assert!(close(easing.apply(7.0), 1.0));
        }
    }

    #[test]
    fn overlay_fade_front_loads_with_ease_out() {
        // The loading overlay should be mostly gone halfway through.
        let mut fade = Fade::new(Duration::from_millis(1500)).with_easing(Easing::EaseOut);
        fade.tick(Duration::from_millis(750));
        assert!(close(fade.progress(), 0.5));
        assert!(close(fade.value(), 0.75));
    }

    #[test]
    fn aurora_crossfade_is_symmetric() {
        let mut fade = Fade::new(Duration::from_secs(1)).with_easing(Easing::EaseInOut);
        fade.tick(Duration::from_millis(250));
        let early = fade.value();
        fade.tick(Duration::from_millis(500));
        let late = fade.value();
        assert!(close(early + late, 1.0));
    }

    #[test]
    fn fade_completes_exactly_on_frame_boundary() {
        let mut fade = Fade::new(FRAME * 10);
        for _ in 0..9 {
            fade.tick(FRAME);
        }
        assert!(!fade.is_complete());
        fade.tick(FRAME);
        assert!(fade.is_complete());
        assert_eq!(fade.value(), 1.0);

        // Overshoot stays clamped.
        fade.tick(Duration::from_secs(5));
        assert_eq!(fade.value(), 1.0);
    }

    #[test]
    fn zero_length_fade_finishes_on_first_tick() {
        let mut fade = Fade::new(Duration::ZERO);
        assert!(!fade.is_complete());
        fade.tick(FRAME);
        assert!(fade.is_complete());
        assert_eq!(fade.length(), Duration::ZERO);
    }

    #[test]
    fn reset_rewinds() {
        let mut fade = Fade::new(Duration::from_millis(800));
        fade.tick(Duration::from_millis(800));
        fade.reset();
        assert_eq!(fade.value(), 0.0);
        assert!(!fade.is_complete());
    }

    #[test]
    fn caret_pulse_visible_then_hidden() {
        let mut caret = Pulse::new(Duration::from_secs(1));
        assert!(close(caret.value(), 1.0));
        caret.tick(Duration::from_millis(500));
        assert!(caret.value() < 0.01);
        caret.tick(Duration::from_millis(500));
        assert!(close(caret.value(), 1.0));
    }

    #[test]
    fn pulse_wraps_without_drift() {
        let mut caret = Pulse::new(Duration::from_millis(500));
        for _ in 0..10_000 {
            caret.tick(FRAME);
        }
        // 160 s is a whole number of periods.
        assert_eq!(caret.offset(), Duration::ZERO);
        assert!(!caret.is_complete());
        caret.tick(Duration::from_millis(1_250));
        assert_eq!(caret.offset(), Duration::from_millis(250));
        caret.reset();
        assert_eq!(caret.offset(), Duration::ZERO);
    }
}
