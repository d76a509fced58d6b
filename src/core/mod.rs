//! Core timing logic for the Pomodoro cycle.
//!
//! This module has no terminal, runtime or I/O dependencies: the phase
//! clock is a plain state machine that the host drives with ticks.

pub mod clock;
pub mod phase;

pub use clock::{format_mm_ss, Durations, PhaseClock, PhaseTransition, Tick};
pub use phase::{Phase, LONG_BREAK_EVERY};
