//! Integration test suite for the Pomodoro timer.
//!
//! These tests drive the public API the way the binary does: the phase
//! clock directly, the TEA update loop with synthetic key events, and the
//! config file through a temporary home.
//!
//! # Test Categories
//!
//! - `cycle_e2e`: Full Work / Break / Long Break cycles
//! - `clock_properties`: Invariant sweeps over the phase clock
//! - `host_flows`: Keyboard-driven flows through `tea::update`
//! - `config_file`: Loading and validating `pomodoro.toml`
//! - `ticker_timing`: The 1 Hz ticker against the clock, with paused time


mod clock_properties;
mod host_flows;
mod ticker_timing;
