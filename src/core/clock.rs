//! The phase clock: countdown state machine for the Pomodoro cycle.
//!
//! `PhaseClock` owns the remaining time, the active phase and the number of
//! completed work intervals. It is driven by one `tick()` per elapsed second
//! while running. When a phase runs out the clock switches to the next phase,
//! pauses itself, and reports the change as a [`PhaseTransition`] so the host
//! can decide how to react (sound, notification, auto-resume).

use std::time::Duration;

use crate::error::{Error, Result};

use super::phase::Phase;

const SECS_PER_MINUTE: u64 = 60;

/// Validated phase lengths in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durations {
    work: u32,
    brk: u32,
    long_break: u32,
}

impl Durations {
    pub const DEFAULT_WORK: u32 = 25;
    pub const DEFAULT_BREAK: u32 = 5;
    pub const DEFAULT_LONG_BREAK: u32 = 15;

    /// Validate three minute counts.
    ///
    /// Every value must be strictly positive and fit a `u32`; otherwise the
    /// whole triple is rejected with [`Error::InvalidConfiguration`].
    pub fn new(work: i64, brk: i64, long_break: i64) -> Result<Self> {
        let minutes = |v: i64| u32::try_from(v).ok().filter(|m| *m > 0);
        match (minutes(work), minutes(brk), minutes(long_break)) {
            (Some(w), Some(b), Some(l)) => Ok(Self {
                work: w,
                brk: b,
                long_break: l,
            }),
            _ => Err(Error::InvalidConfiguration {
                work,
                brk,
                long_break,
            }),
        }
    }

    pub fn work(&self) -> u32 {
        self.work
    }

    pub fn brk(&self) -> u32 {
        self.brk
    }

    pub fn long_break(&self) -> u32 {
        self.long_break
    }

    /// Configured length of `phase` in minutes.
    pub fn minutes_for(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Work => self.work,
            Phase::Break => self.brk,
            Phase::LongBreak => self.long_break,
        }
    }

    /// Configured length of `phase` in seconds.
    pub fn secs_for(&self, phase: Phase) -> u64 {
        u64::from(self.minutes_for(phase)) * SECS_PER_MINUTE
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            work: Self::DEFAULT_WORK,
            brk: Self::DEFAULT_BREAK,
            long_break: Self::DEFAULT_LONG_BREAK,
        }
    }
}

/// A completed phase and the phase the clock moved into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: Phase,
    pub to: Phase,
    /// Completed work intervals after this transition.
    pub completed_work_intervals: u32,
}

impl PhaseTransition {
    /// A work interval just finished (a "Pomodoro complete" event).
    pub fn is_work_complete(&self) -> bool {
        !self.from.is_break()
    }

    /// A break just finished and work resumes.
    pub fn is_break_over(&self) -> bool {
        self.from.is_break()
    }
}

/// Outcome of a single [`PhaseClock::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// The clock is paused; nothing changed.
    Idle,
    /// One second elapsed within the current phase. Carries the new
    /// progress fraction.
    Progress(f64),
    /// The current phase ran out. The clock is now paused at the start of
    /// the next phase.
    Completed(PhaseTransition),
}

/// Countdown state machine for the Work / Break / Long Break cycle.
#[derive(Debug, Clone)]
pub struct PhaseClock {
    durations: Durations,
    phase: Phase,
    /// Seconds left in the current phase, always in `1..=phase_total_secs()`.
    time_remaining: u64,
    completed_work_intervals: u32,
    running: bool,
}

impl PhaseClock {
    pub fn new(durations: Durations) -> Self {
        Self {
            durations,
            phase: Phase::Work,
            time_remaining: durations.secs_for(Phase::Work),
            completed_work_intervals: 0,
            running: false,
        }
    }

    /// Replace the phase lengths.
    ///
    /// The active phase keeps its identity but its remaining time restarts
    /// at the new full length; partial progress is discarded. Rejected
    /// values leave the clock untouched.
    pub fn configure(&mut self, work: i64, brk: i64, long_break: i64) -> Result<()> {
        self.durations = Durations::new(work, brk, long_break)?;
        self.time_remaining = self.phase_total_secs();
        Ok(())
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Start when paused, pause when running. Returns the new running state.
    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Back to a fresh Work phase with no completed intervals. Durations are kept.
    pub fn reset(&mut self) {
        self.phase = Phase::Work;
        self.time_remaining = self.durations.secs_for(Phase::Work);
        self.completed_work_intervals = 0;
        self.running = false;
    }

    /// Advance the countdown by one second.
    ///
    /// A tick that would bring the remaining time to zero completes the
    /// phase instead: no caller ever observes a phase with zero seconds left.
    pub fn tick(&mut self) -> Tick {
        if !self.running {
            return Tick::Idle;
        }

        if self.time_remaining > 1 {
            self.time_remaining -= 1;
            return Tick::Progress(self.progress_fraction());
        }

        Tick::Completed(self.complete_phase())
    }

    fn complete_phase(&mut self) -> PhaseTransition {
        let from = self.phase;
        if from == Phase::Work {
            self.completed_work_intervals = self.completed_work_intervals.saturating_add(1);
        }
        let to = from.next(self.completed_work_intervals);

        self.phase = to;
        self.time_remaining = self.durations.secs_for(to);
        self.running = false;

        PhaseTransition {
            from,
            to,
            completed_work_intervals: self.completed_work_intervals,
        }
    }

    /// Elapsed share of the current phase, in `[0, 1)`.
    pub fn progress_fraction(&self) -> f64 {
        1.0 - self.time_remaining as f64 / self.phase_total_secs() as f64
    }

    pub fn phase_label(&self) -> &'static str {
        self.phase.label()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn time_remaining(&self) -> Duration {
        Duration::from_secs(self.time_remaining)
    }

    pub fn time_remaining_secs(&self) -> u64 {
        self.time_remaining
    }

    /// Full length of the current phase in seconds.
    pub fn phase_total_secs(&self) -> u64 {
        self.durations.secs_for(self.phase)
    }

    pub fn completed_work_intervals(&self) -> u32 {
        self.completed_work_intervals
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn durations(&self) -> Durations {
        self.durations
    }
}

impl Default for PhaseClock {
    fn default() -> Self {
        Self::new(Durations::default())
    }
}

/// Format seconds as "MM:SS". Minutes are not wrapped at the hour.
pub fn format_mm_ss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / SECS_PER_MINUTE, secs % SECS_PER_MINUTE)
}
