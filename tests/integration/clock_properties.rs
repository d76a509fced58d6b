//! Invariant sweeps over the phase clock.
//!
//! Each test walks a range of configurations or sequence lengths rather
//! than a single hand-picked case.

use pomodoro::core::{Durations, Phase, PhaseClock, Tick, LONG_BREAK_EVERY};
use pomodoro::Error;

use crate::fixtures::run_phase;

fn small_clock() -> PhaseClock {
    PhaseClock::new(Durations::new(2, 1, 3).unwrap())
}

#[test]
fn test_completion_count_and_break_kind_for_n_intervals() {
    for n in 1..=12u32 {
        let mut clock = small_clock();
        for k in 1..=n {
            let work = run_phase(&mut clock);
            assert_eq!(work.from, Phase::Work);
            let expected = if k % LONG_BREAK_EVERY == 0 {
                Phase::LongBreak
            } else {
                Phase::Break
            };
            assert_eq!(clock.phase(), expected, "After completion {} of {}", k, n);
            if k < n {
                run_phase(&mut clock);
            }
        }
        assert_eq!(clock.completed_work_intervals(), n);
    }
}

#[test]
fn test_progress_bounded_monotonic_and_zero_after_transition() {
    let mut clock = small_clock();
    clock.start();

    let mut last = clock.progress_fraction();
    assert_eq!(last, 0.0);

    let mut transitions = 0;
    while transitions < 10 {
        match clock.tick() {
            Tick::Progress(p) => {
                assert!((0.0..1.0).contains(&p), "Progress {} out of range", p);
                assert!(p >= last, "Progress went backwards: {} -> {}", last, p);
                assert_eq!(p, clock.progress_fraction());
                last = p;
            }
            Tick::Completed(_) => {
                assert_eq!(clock.progress_fraction(), 0.0);
                last = 0.0;
                transitions += 1;
                clock.start();
            }
            Tick::Idle => panic!("Running clock returned Idle"),
        }
    }
}

#[test]
fn test_reset_from_every_reachable_phase() {
    let durations = Durations::new(2, 1, 3).unwrap();
    for transitions in 0..10 {
        for extra_ticks in [0u64, 1, 30] {
            let mut clock = PhaseClock::new(durations);
            for _ in 0..transitions {
                run_phase(&mut clock);
            }
            clock.start();
            for _ in 0..extra_ticks {
                clock.tick();
            }

            clock.reset();

            assert_eq!(clock.phase(), Phase::Work);
            assert_eq!(clock.time_remaining_secs(), 120);
            assert_eq!(clock.completed_work_intervals(), 0);
            assert!(!clock.is_running());
            assert_eq!(clock.durations(), durations);
        }
    }
}

#[test]
fn test_configure_rejects_non_positive_values() {
    let rejected: [(i64, i64, i64); 7] = [
        (0, 5, 15),
        (-1, 5, 15),
        (25, 0, 15),
        (25, 5, 0),
        (25, -5, 15),
        (25, 5, -15),
        (i64::MIN, i64::MIN, i64::MIN),
    ];

    for (work, brk, long_break) in rejected {
        let mut clock = PhaseClock::default();
        clock.start();
        for _ in 0..10 {
            clock.tick();
        }
        let before = clock.clone();

        match clock.configure(work, brk, long_break) {
            Err(Error::InvalidConfiguration { .. }) => {}
            other => panic!(
                "Expected InvalidConfiguration for {:?}, got {:?}",
                (work, brk, long_break),
                other
            ),
        }

        assert_eq!(clock.durations(), before.durations());
        assert_eq!(clock.time_remaining_secs(), before.time_remaining_secs());
        assert_eq!(clock.phase(), before.phase());
        assert_eq!(clock.is_running(), before.is_running());
    }
}

#[test]
fn test_configure_keeps_count_and_running_flag() {
    let mut clock = small_clock();
    run_phase(&mut clock);
    clock.start();
    clock.tick();

    clock.configure(4, 2, 6).unwrap();

    assert_eq!(clock.phase(), Phase::Break);
    assert_eq!(clock.time_remaining_secs(), 120);
    assert_eq!(clock.completed_work_intervals(), 1);
    assert!(clock.is_running());
}

#[test]
fn test_start_and_pause_are_idempotent() {
    let mut clock = PhaseClock::default();
    clock.start();
    clock.tick();

    clock.start();
    let once = (clock.is_running(), clock.time_remaining_secs());
    clock.start();
    assert_eq!((clock.is_running(), clock.time_remaining_secs()), once);

    clock.pause();
    let once = (clock.is_running(), clock.time_remaining_secs());
    clock.pause();
    assert_eq!((clock.is_running(), clock.time_remaining_secs()), once);
}

#[test]
fn test_remaining_never_observed_as_zero() {
    let mut clock = PhaseClock::new(Durations::new(1, 1, 1).unwrap());
    clock.start();
    for _ in 0..1000 {
        clock.tick();
        assert!(clock.time_remaining_secs() >= 1);
        assert!(clock.time_remaining_secs() <= clock.phase_total_secs());
        if !clock.is_running() {
            clock.start();
        }
    }
}
