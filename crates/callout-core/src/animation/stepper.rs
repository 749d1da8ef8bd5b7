#![forbid(unsafe_code)]

//! Fixed-cadence eased stepping with per-tick callbacks.
//!
//! A [`Stepper`] owns a [`Tween`] and an `apply` callback. Every call to
//! [`step`](Stepper::step) advances the tween by one interval (50ms by
//! default) and calls `apply(current, delta)`, where `delta` is the change
//! since the previous call. Once elapsed time reaches the duration the
//! stepper issues one last `apply(end, 0.0)` and then fires the completion
//! callback.
//!
//! # Invariants
//!
//! 1. Tick `n` reports the eased value at `n * interval`.
//! 2. The final call always carries the exact end value and a zero delta.
//! 3. Under [`FaultPolicy::Isolate`], the completion callback fires exactly
//!    once, whatever `apply` returns.
//! 4. Under [`FaultPolicy::Abort`], the first failing `apply` stops the
//!    animation: no final call, no completion callback.
//! 5. Stepping a finished or aborted stepper does nothing.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use callout_core::animation::{StepOutcome, Stepper};
//!
//! let mut seen = Vec::new();
//! let mut stepper = Stepper::new(
//!     |value, _delta| {
//!         seen.push(value);
//!         Ok(())
//!     },
//!     0.0,
//!     100.0,
//!     Duration::from_millis(100),
//! );
//! assert_eq!(stepper.step().unwrap(), StepOutcome::Pending);
//! assert_eq!(stepper.step().unwrap(), StepOutcome::Finished);
//! drop(stepper);
//! assert_eq!(seen.len(), 3);
//! ```

use std::fmt;
use std::time::Duration;

use super::ticker::{RunOutcome, Ticker};
use super::{Animation, EasingFn, Tween};

/// Error type returned by a tick callback.
pub type TickError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Completion continuation.
type OnComplete = Box<dyn FnOnce() + Send>;

/// Default tick cadence.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(50);

/// What to do when the tick callback fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaultPolicy {
    /// Log and discard the error; keep animating.
    #[default]
    Isolate,
    /// Stop the animation at the first error.
    Abort,
}

/// Result of a single [`Stepper::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// More ticks are needed.
    Pending,
    /// The final value was delivered (or the stepper was already done).
    Finished,
}

/// Errors surfaced by the stepper.
#[derive(Debug)]
pub enum AnimationError {
    /// A tick callback failed under [`FaultPolicy::Abort`].
    Aborted {
        /// 1-based tick number; the final end-value call counts as its own tick.
        tick: u32,
        /// Error returned by the callback.
        source: TickError,
    },
}

impl fmt::Display for AnimationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aborted { tick, source } => {
                write!(f, "animation aborted at tick {tick}: {source}")
            }
        }
    }
}

impl std::error::Error for AnimationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Aborted { source, .. } => Some(source.as_ref()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Running,
    Finished,
    Aborted,
}

/// Drives a [`Tween`] at a fixed cadence, reporting each value to `apply`.
pub struct Stepper<F> {
    apply: F,
    tween: Tween,
    interval: Duration,
    previous: f64,
    ticks: u32,
    policy: FaultPolicy,
    faults: u32,
    last_fault: Option<String>,
    on_complete: Option<OnComplete>,
    phase: Phase,
}

impl<F> fmt::Debug for Stepper<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stepper")
            .field("tween", &self.tween)
            .field("interval", &self.interval)
            .field("ticks", &self.ticks)
            .field("policy", &self.policy)
            .field("faults", &self.faults)
            .field("phase", &self.phase)
            .finish()
    }
}

impl<F> Stepper<F>
where
    F: FnMut(f64, f64) -> Result<(), TickError>,
{
    /// Animate from `from` to `to` over `duration`, calling `apply(value, delta)`.
    pub fn new(apply: F, from: f64, to: f64, duration: Duration) -> Self {
        Self {
            apply,
            tween: Tween::new(from, to, duration),
            interval: DEFAULT_INTERVAL,
            previous: from,
            ticks: 0,
            policy: FaultPolicy::default(),
            faults: 0,
            last_fault: None,
            on_complete: None,
            phase: Phase::Running,
        }
    }

    /// Set the tick cadence (builder). A zero interval falls back to the default.
    #[must_use]
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = if interval.is_zero() {
            DEFAULT_INTERVAL
        } else {
            interval
        };
        self
    }

    /// Set the easing function (builder).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.tween = self.tween.easing(easing);
        self
    }

    /// Set the fault policy (builder).
    #[must_use]
    pub fn fault_policy(mut self, policy: FaultPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Register the completion continuation (builder).
    #[must_use]
    pub fn on_complete(mut self, on_complete: impl FnOnce() + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(on_complete));
        self
    }

    /// Tick cadence.
    pub fn tick_interval(&self) -> Duration {
        self.interval
    }

    /// Number of ticks delivered so far, excluding the final end-value call.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Number of callback errors that were isolated.
    pub fn faults(&self) -> u32 {
        self.faults
    }

    /// Message of the most recent isolated callback error.
    pub fn last_fault(&self) -> Option<&str> {
        self.last_fault.as_deref()
    }

    /// Whether the stepper will deliver no further calls.
    pub fn is_finished(&self) -> bool {
        self.phase != Phase::Running
    }

    /// Whether the stepper stopped because of an aborting fault.
    pub fn was_aborted(&self) -> bool {
        self.phase == Phase::Aborted
    }

    /// Advance by one interval.
    pub fn step(&mut self) -> Result<StepOutcome, AnimationError> {
        if self.is_finished() {
            return Ok(StepOutcome::Finished);
        }

        self.tween.tick(self.interval);
        self.ticks += 1;

        let current = self.tween.current();
        let delta = current - self.previous;
        let result = (self.apply)(current, delta);
        self.previous = current;
        self.absorb(result, self.ticks)?;

        if !self.tween.is_complete() {
            return Ok(StepOutcome::Pending);
        }

        let end = self.tween.end();
        let result = (self.apply)(end, 0.0);
        self.previous = end;
        self.absorb(result, self.ticks + 1)?;

        self.phase = Phase::Finished;
        crate::trace!(ticks = self.ticks, faults = self.faults, "animation finished");
        if let Some(on_complete) = self.on_complete.take() {
            on_complete();
        }
        Ok(StepOutcome::Finished)
    }

    /// Step until finished, pacing each tick with `ticker`.
    ///
    /// Returns [`RunOutcome::Cancelled`] if the ticker stops before the end;
    /// the completion callback is not invoked in that case.
    pub fn run<T>(&mut self, ticker: &mut T) -> Result<RunOutcome, AnimationError>
    where
        T: Ticker + ?Sized,
    {
        while !self.is_finished() {
            if !ticker.wait(self.interval) {
                crate::debug!(ticks = self.ticks, "animation cancelled");
                return Ok(RunOutcome::Cancelled);
            }
            self.step()?;
        }
        Ok(RunOutcome::Completed)
    }

    fn absorb(&mut self, result: Result<(), TickError>, tick: u32) -> Result<(), AnimationError> {
        let Err(source) = result else {
            return Ok(());
        };
        match self.policy {
            FaultPolicy::Isolate => {
                self.faults += 1;
                let message = source.to_string();
                crate::warn!(tick, error = %message, "animation tick failed; continuing");
                self.last_fault = Some(message);
                Ok(())
            }
            FaultPolicy::Abort => {
                self.phase = Phase::Aborted;
                crate::debug!(tick, "animation aborted by tick failure");
                Err(AnimationError::Aborted { tick, source })
            }
        }
    }
}
