#![forbid(unsafe_code)]

//! Eased value animation.
//!
//! [`Tween`] is the pure state machine: it interpolates between two values
//! as time is fed to it. [`Stepper`](stepper::Stepper) drives a tween on a
//! fixed cadence and reports every intermediate value to a callback, and the
//! [`ticker`] module supplies the clocks that pace it.
//!
//! ```
//! use std::time::Duration;
//! use callout_core::animation::{Animation, Tween};
//!
//! let mut tween = Tween::new(0.0, 100.0, Duration::from_millis(200));
//! tween.tick(Duration::from_millis(100));
//! assert!((tween.current() - 50.0).abs() < 1e-9);
//! ```

pub mod stepper;
pub mod ticker;

pub use stepper::{AnimationError, FaultPolicy, StepOutcome, Stepper, TickError};
pub use ticker::{
    AnimationHandle, ManualTicker, RunOutcome, StopSignal, ThreadTicker, Ticker, spawn,
};

use std::f64::consts::PI;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f64) -> f64;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

/// Half-cosine ease-in-out: `(1 - cos(pi * t)) / 2`.
///
/// Slow at both ends, exactly 0.5 at the midpoint.
#[inline]
pub fn ease_in_out_cosine(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    (1.0 - (PI * t).cos()) / 2.0
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-based animation with a normalized progress value.
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current eased progress, in [0.0, 1.0].
    fn value(&self) -> f64;

    /// Reset the animation to its initial state.
    fn reset(&mut self);

    /// Time elapsed past completion.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// Interpolates an `f64` from `from` to `to` over a duration.
///
/// Elapsed time is tracked as a [`Duration`] so repeated fixed ticks
/// accumulate without floating-point drift. A zero duration is treated as
/// already finished: any progress query reports the end value.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f64,
    to: f64,
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Tween {
    /// Create a tween with the default half-cosine easing.
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
            easing: ease_in_out_cosine,
        }
    }

    /// Set the easing function (builder).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Start value.
    pub fn start(&self) -> f64 {
        self.from
    }

    /// End value.
    pub fn end(&self) -> f64 {
        self.to
    }

    /// Total duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Time fed so far.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Raw linear progress (before easing), in [0.0, 1.0].
    pub fn raw_progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        t.clamp(0.0, 1.0)
    }

    /// Current interpolated value.
    pub fn current(&self) -> f64 {
        self.from + self.value() * (self.to - self.from)
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f64 {
        (self.easing)(self.raw_progress())
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const MS_50: Duration = Duration::from_millis(50);
    const MS_100: Duration = Duration::from_millis(100);
    const MS_200: Duration = Duration::from_millis(200);

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // ---- Easing tests ----

    #[test]
    fn cosine_endpoints() {
        assert!(close(ease_in_out_cosine(0.0), 0.0));
        assert!(close(ease_in_out_cosine(1.0), 1.0));
    }

    #[test]
    fn cosine_midpoint_is_half() {
        assert!(close(ease_in_out_cosine(0.5), 0.5));
    }

    #[test]
    fn cosine_is_symmetric() {
        for t in [0.1, 0.25, 0.4] {
            assert!(close(ease_in_out_cosine(t) + ease_in_out_cosine(1.0 - t), 1.0));
        }
    }

    #[test]
    fn cosine_slow_start() {
        assert!(ease_in_out_cosine(0.25) < linear(0.25));
        assert!(ease_in_out_cosine(0.75) > linear(0.75));
    }

    #[test]
    fn easing_clamps_input() {
        assert!(close(linear(-1.0), 0.0));
        assert!(close(linear(2.0), 1.0));
        assert!(close(ease_in_out_cosine(-0.5), 0.0));
        assert!(close(ease_in_out_cosine(1.5), 1.0));
    }

    // ---- Tween tests ----

    #[test]
    fn tween_starts_at_from() {
        let tween = Tween::new(10.0, 90.0, MS_200);
        assert!(close(tween.current(), 10.0));
        assert!(!tween.is_complete());
    }

    #[test]
    fn tween_quarter_follows_cosine() {
        let mut tween = Tween::new(0.0, 100.0, MS_200);
        tween.tick(MS_50);
        let expected = (1.0 - (PI * 0.25).cos()) / 2.0 * 100.0;
        assert!(close(tween.current(), expected));
    }

    #[test]
    fn tween_ends_at_to() {
        let mut tween = Tween::new(0.0, 100.0, MS_200);
        tween.tick(MS_200);
        assert!(tween.is_complete());
        assert!(close(tween.current(), 100.0));
    }

    #[test]
    fn tween_negative_range() {
        let mut tween = Tween::new(100.0, -50.0, MS_100).easing(linear);
        tween.tick(Duration::from_millis(50));
        assert!(close(tween.current(), 25.0));
    }

    #[test]
    fn tween_clamps_overshoot() {
        let mut tween = Tween::new(0.0, 1.0, MS_100);
        tween.tick(Duration::from_secs(1));
        assert!(close(tween.current(), 1.0));
        assert_eq!(tween.overshoot(), Duration::from_millis(900));
    }

    #[test]
    fn last_tick_of_uneven_duration_lands_on_end() {
        let mut tween = Tween::new(10.0, 20.0, Duration::from_millis(120));
        let mut values = Vec::new();
        for _ in 0..3 {
            tween.tick(Duration::from_millis(50));
            values.push(tween.current());
        }
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert!(close(values[2], 20.0));
    }

    #[test]
    fn tween_zero_duration_is_finished() {
        let tween = Tween::new(3.0, 7.0, Duration::ZERO);
        assert!(tween.is_complete());
        assert!(close(tween.current(), 7.0));
    }

    #[test]
    fn tween_reset() {
        let mut tween = Tween::new(0.0, 5.0, MS_100);
        tween.tick(MS_100);
        tween.reset();
        assert!(!tween.is_complete());
        assert_eq!(tween.elapsed(), Duration::ZERO);
    }

    #[test]
    fn tween_fixed_ticks_do_not_drift() {
        let mut tween = Tween::new(0.0, 1.0, Duration::from_secs(1));
        for _ in 0..20 {
            tween.tick(MS_50);
        }
        assert!(tween.is_complete());
        assert_eq!(tween.overshoot(), Duration::ZERO);
    }
}
