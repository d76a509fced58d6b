use crate::core::{Durations, Phase};
use crate::tea::{Mode, Notification, SettingsDraft};
use std::sync::atomic::{AtomicU64, Ordering};

static VERSION_COUNTER: AtomicU64 = AtomicU64::new(1);

pub fn next_version() -> u64 {
    VERSION_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Immutable view of the timer handed to the render thread.
#[derive(Debug, Clone)]
pub struct RenderState {
    pub version: u64,
    pub phase: Phase,
    /// "Ready", "Paused" or the phase label.
    pub status_label: &'static str,
    /// Remaining time as "MM:SS".
    pub time_text: String,
    /// Elapsed share of the current phase, in `[0, 1)`.
    pub progress: f64,
    pub completed_work_intervals: u32,
    pub running: bool,
    pub durations: Durations,
    pub mode: Mode,
    pub input_buffer: String,
    pub settings_draft: SettingsDraft,
    pub notification: Option<Notification>,
    /// Whether the keymap legend is expanded (toggled by '?')
    pub show_keymap: bool,
    /// Bells requested so far; the render loop rings when this grows.
    pub bell_count: u64,
}

impl RenderState {
    /// Progress as a whole percentage for the gauge label.
    pub fn progress_percentage(&self) -> u16 {
        (self.progress.clamp(0.0, 1.0) * 100.0).floor() as u16
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            version: 0,
            phase: Phase::Work,
            status_label: "Ready",
            time_text: String::from("00:00"),
            progress: 0.0,
            completed_work_intervals: 0,
            running: false,
            durations: Durations::default(),
            mode: Mode::Clock,
            input_buffer: String::new(),
            settings_draft: SettingsDraft::default(),
            notification: None,
            show_keymap: false,
            bell_count: 0,
        }
    }
}
