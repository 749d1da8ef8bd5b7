//! Integration tests for the animation stepper.

use callout_core::animation::*;
use proptest::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[test]
fn two_hundred_ms_runs_four_ticks_then_final_call() {
    let mut calls: Vec<(f64, f64)> = Vec::new();
    let completions = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&completions);
    let mut ticker = ManualTicker::new();

    let outcome = Stepper::new(
        |value, delta| {
            calls.push((value, delta));
            Ok(())
        },
        0.0,
        100.0,
        Duration::from_millis(200),
    )
    .on_complete(move || {
        seen.fetch_add(1, Ordering::SeqCst);
    })
    .run(&mut ticker)
    .expect("isolated run cannot fail");

    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(ticker.elapsed(), Duration::from_millis(200), "ticks at 50,100,150,200ms");
    assert_eq!(calls.len(), 5, "four ticks plus the final call");
    assert_eq!(*calls.last().unwrap(), (100.0, 0.0));
    assert_eq!(completions.load(Ordering::SeqCst), 1);
}

#[test]
fn always_failing_callback_still_completes() {
    let completions = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&completions);
    let mut stepper = Stepper::new(
        |_, _| Err(std::io::Error::other("detached").into()),
        0.0,
        100.0,
        Duration::from_millis(200),
    )
    .on_complete(move || {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    let outcome = stepper.run(&mut ManualTicker::new()).unwrap();
    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(completions.load(Ordering::SeqCst), 1);
    assert_eq!(stepper.faults(), 5);
}

#[test]
fn abort_policy_surfaces_source_error() {
    let mut stepper = Stepper::new(
        |_, _| Err(std::io::Error::other("detached").into()),
        0.0,
        1.0,
        Duration::from_millis(200),
    )
    .fault_policy(FaultPolicy::Abort);

    let err = stepper.run(&mut ManualTicker::new()).unwrap_err();
    let source = std::error::Error::source(&err).expect("source attached");
    assert_eq!(source.to_string(), "detached");
}

#[test]
fn values_are_monotonic_for_increasing_range() {
    let mut values = Vec::new();
    let mut stepper = Stepper::new(
        |v, _| {
            values.push(v);
            Ok(())
        },
        -10.0,
        10.0,
        Duration::from_millis(1000),
    );
    stepper.run(&mut ManualTicker::new()).unwrap();
    drop(stepper);
    assert!(values.windows(2).all(|w| w[0] <= w[1]));
}

proptest! {
    #[test]
    fn completion_fires_exactly_once(
        from in -1000.0f64..1000.0,
        to in -1000.0f64..1000.0,
        duration_ms in 0u64..2000,
        interval_ms in 1u64..200,
        fail in any::<bool>(),
    ) {
        let completions = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&completions);
        let mut last = None;
        let mut stepper = Stepper::new(
            |v, d| {
                last = Some((v, d));
                if fail { Err("nope".into()) } else { Ok(()) }
            },
            from,
            to,
            Duration::from_millis(duration_ms),
        )
        .interval(Duration::from_millis(interval_ms))
        .on_complete(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let outcome = stepper.run(&mut ManualTicker::new()).unwrap();
        let expected_ticks = duration_ms.div_ceil(interval_ms).max(1);
        prop_assert_eq!(outcome, RunOutcome::Completed);
        prop_assert_eq!(u64::from(stepper.ticks()), expected_ticks);
        drop(stepper);
        prop_assert_eq!(completions.load(Ordering::SeqCst), 1);
        prop_assert_eq!(last, Some((to, 0.0)));
    }
}
