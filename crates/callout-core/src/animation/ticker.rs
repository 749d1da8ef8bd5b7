#![forbid(unsafe_code)]

//! Clocks that pace a [`Stepper`](super::Stepper).
//!
//! A [`Ticker`] blocks (or not) for one interval and reports whether the
//! animation should keep going. [`ManualTicker`] never sleeps and is what
//! tests and cooperative hosts use; [`ThreadTicker`] sleeps on a condition
//! variable so a [`StopSignal`] can interrupt it mid-interval.
//!
//! Cancellation lives here rather than in the stepper: a cancelled run
//! simply never receives its next tick.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use super::stepper::{AnimationError, Stepper, TickError};

/// Paces animation ticks.
pub trait Ticker {
    /// Wait for one interval. Returns `false` if the animation should stop.
    fn wait(&mut self, interval: Duration) -> bool;
}

/// How a paced run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The final value was delivered.
    Completed,
    /// The ticker stopped the run early.
    Cancelled,
}

/// A ticker that advances virtual time without sleeping.
#[derive(Debug, Clone, Default)]
pub struct ManualTicker {
    waits: u32,
    elapsed: Duration,
    stop_after: Option<u32>,
}

impl ManualTicker {
    /// Create a ticker that never stops on its own.
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse every wait after the first `ticks` (builder).
    #[must_use]
    pub fn stop_after(mut self, ticks: u32) -> Self {
        self.stop_after = Some(ticks);
        self
    }

    /// Number of granted waits.
    pub fn waits(&self) -> u32 {
        self.waits
    }

    /// Total virtual time granted.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl Ticker for ManualTicker {
    fn wait(&mut self, interval: Duration) -> bool {
        if self.stop_after.is_some_and(|limit| self.waits >= limit) {
            return false;
        }
        self.waits += 1;
        self.elapsed = self.elapsed.saturating_add(interval);
        true
    }
}

/// Shared stop flag with a condition variable for prompt wakeup.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    /// Create an untriggered signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trigger the signal and wake every waiter.
    pub fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        *stopped = true;
        cvar.notify_all();
    }

    /// Check if the signal has been triggered.
    pub fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Wait for either the signal or a timeout.
    ///
    /// Returns `true` if stopped, `false` if the timeout elapsed. Spurious
    /// wakeups are absorbed.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let start = Instant::now();
        loop {
            if *stopped {
                return true;
            }
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return false;
            }
            let (guard, _) = cvar
                .wait_timeout(stopped, duration - elapsed)
                .unwrap_or_else(PoisonError::into_inner);
            stopped = guard;
        }
    }
}

/// A ticker that sleeps in real time and honors a [`StopSignal`].
#[derive(Debug, Clone, Default)]
pub struct ThreadTicker {
    stop: StopSignal,
}

impl ThreadTicker {
    /// Create a ticker bound to `stop`.
    pub fn new(stop: StopSignal) -> Self {
        Self { stop }
    }
}

impl Ticker for ThreadTicker {
    fn wait(&mut self, interval: Duration) -> bool {
        !self.stop.wait_timeout(interval)
    }
}

/// Handle to an animation running on a background thread.
#[derive(Debug)]
pub struct AnimationHandle {
    stop: StopSignal,
    thread: Option<thread::JoinHandle<Result<RunOutcome, AnimationError>>>,
}

impl AnimationHandle {
    /// Stop the animation before its next tick.
    pub fn cancel(&self) {
        self.stop.stop();
    }

    /// Whether the background thread has exited.
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().is_none_or(|t| t.is_finished())
    }

    /// Wait for the run to end.
    ///
    /// A panic inside the tick callback is re-raised on the joining thread.
    pub fn join(mut self) -> Result<RunOutcome, AnimationError> {
        match self.thread.take() {
            Some(handle) => match handle.join() {
                Ok(outcome) => outcome,
                Err(payload) => std::panic::resume_unwind(payload),
            },
            None => Ok(RunOutcome::Cancelled),
        }
    }
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        // Detached animations are cancelled rather than left running.
        if self.thread.is_some() {
            self.stop.stop();
        }
    }
}

/// Run `stepper` on a background thread paced by a [`ThreadTicker`].
pub fn spawn<F>(mut stepper: Stepper<F>) -> AnimationHandle
where
    F: FnMut(f64, f64) -> Result<(), TickError> + Send + 'static,
{
    let stop = StopSignal::new();
    let mut ticker = ThreadTicker::new(stop.clone());
    let thread = thread::spawn(move || stepper.run(&mut ticker));
    AnimationHandle {
        stop,
        thread: Some(thread),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn manual_ticker_counts_virtual_time() {
        let mut ticker = ManualTicker::new();
        assert!(ticker.wait(Duration::from_millis(50)));
        assert!(ticker.wait(Duration::from_millis(50)));
        assert_eq!(ticker.waits(), 2);
        assert_eq!(ticker.elapsed(), Duration::from_millis(100));
    }

    #[test]
    fn manual_ticker_stop_after() {
        let mut ticker = ManualTicker::new().stop_after(1);
        assert!(ticker.wait(Duration::from_millis(50)));
        assert!(!ticker.wait(Duration::from_millis(50)));
        assert_eq!(ticker.waits(), 1);
    }

    #[test]
    fn run_to_completion_with_manual_ticker() {
        let mut ticker = ManualTicker::new();
        let mut stepper = Stepper::new(|_, _| Ok(()), 0.0, 100.0, Duration::from_millis(200));
        assert_eq!(stepper.run(&mut ticker).unwrap(), RunOutcome::Completed);
        assert_eq!(ticker.waits(), 4);
        assert_eq!(ticker.elapsed(), Duration::from_millis(200));
    }

    #[test]
    fn cancelled_run_skips_completion() {
        let done = Arc::new(AtomicUsize::new(0));
        let flag = Arc::clone(&done);
        let mut calls = 0;
        let mut ticker = ManualTicker::new().stop_after(2);
        let mut stepper = Stepper::new(
            |_, _| {
                calls += 1;
                Ok(())
            },
            0.0,
            1.0,
            Duration::from_millis(200),
        )
        .on_complete(move || {
            flag.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(stepper.run(&mut ticker).unwrap(), RunOutcome::Cancelled);
        drop(stepper);
        assert_eq!(calls, 2);
        assert_eq!(done.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn stop_signal_wait_returns_true_when_stopped() {
        let signal = StopSignal::new();
        signal.stop();
        assert!(signal.is_stopped());
        assert!(signal.wait_timeout(Duration::from_millis(100)));
    }

    #[test]
    fn stop_signal_wait_returns_false_on_timeout() {
        let signal = StopSignal::new();
        assert!(!signal.wait_timeout(Duration::from_millis(10)));
    }

    #[test]
    fn spawned_animation_completes() {
        let done = Arc::new(AtomicUsize::new(0));
        let flag = Arc::clone(&done);
        let stepper = Stepper::new(|_, _| Ok(()), 0.0, 1.0, Duration::from_millis(20))
            .interval(Duration::from_millis(5))
            .on_complete(move || {
                flag.fetch_add(1, Ordering::SeqCst);
            });
        let handle = spawn(stepper);
        assert_eq!(handle.join().unwrap(), RunOutcome::Completed);
        assert_eq!(done.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn spawned_animation_can_be_cancelled() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&ticks);
        let stepper = Stepper::new(
            move |_, _| {
                seen.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
            0.0,
            1.0,
            Duration::from_secs(60),
        )
        .interval(Duration::from_secs(10));
        let handle = spawn(stepper);
        handle.cancel();
        assert_eq!(handle.join().unwrap(), RunOutcome::Cancelled);
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
    }
}
