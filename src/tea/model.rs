//! Model for the TEA (The Elm Architecture) pattern.
//!
//! The Model is pure application state - no channels, no handles, no runtime infrastructure.

use crate::config::Config;
use crate::core::{format_mm_ss, Durations, PhaseClock};
use crate::render::{next_version, RenderState};
use crate::{Error, Result};

/// Shown when the settings dialog holds anything but three positive integers.
pub const INVALID_SETTINGS_MSG: &str = "Please enter valid positive integers.";

/// Level of a notification message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Error notification - displayed in red with "Error:" prefix
    Error,
    /// Informational notification - displayed in green
    Info,
}

/// A notification message to display to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Application UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Clock,
    Settings(SettingsField),
}

/// Fields of the settings dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Work,
    Break,
    LongBreak,
}

impl SettingsField {
    pub const ALL: [SettingsField; 3] = [
        SettingsField::Work,
        SettingsField::Break,
        SettingsField::LongBreak,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SettingsField::Work => "Work",
            SettingsField::Break => "Break",
            SettingsField::LongBreak => "Long Break",
        }
    }

    /// Cycle to next input field (Tab behavior).
    pub fn next(&self) -> SettingsField {
        match self {
            SettingsField::Work => SettingsField::Break,
            SettingsField::Break => SettingsField::LongBreak,
            SettingsField::LongBreak => SettingsField::Work,
        }
    }
}

/// Presentation-only timer status. The clock itself only knows running/paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerStatus {
    /// Fresh start or after reset.
    #[default]
    Ready,
    /// Started, or a phase just changed: show the phase label.
    Active,
    /// Paused by the user.
    Paused,
}

/// Raw text of the three settings fields while the dialog is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsDraft {
    pub work: String,
    pub brk: String,
    pub long_break: String,
}

impl SettingsDraft {
    pub fn from_durations(durations: Durations) -> Self {
        Self {
            work: durations.work().to_string(),
            brk: durations.brk().to_string(),
            long_break: durations.long_break().to_string(),
        }
    }

    pub fn get(&self, field: SettingsField) -> &str {
        match field {
            SettingsField::Work => &self.work,
            SettingsField::Break => &self.brk,
            SettingsField::LongBreak => &self.long_break,
        }
    }

    pub fn set(&mut self, field: SettingsField, value: String) {
        match field {
            SettingsField::Work => self.work = value,
            SettingsField::Break => self.brk = value,
            SettingsField::LongBreak => self.long_break = value,
        }
    }

    /// Parse all three fields as positive integers.
    pub fn parse(&self) -> Result<(i64, i64, i64)> {
        let field = |s: &str| {
            s.trim()
                .parse::<i64>()
                .ok()
                .filter(|v| *v > 0)
                .ok_or_else(|| Error::Validation(INVALID_SETTINGS_MSG.to_string()))
        };
        Ok((field(&self.work)?, field(&self.brk)?, field(&self.long_break)?))
    }
}

/// Pure application state - the single source of truth.
pub struct Model {
    pub clock: PhaseClock,
    pub status: TimerStatus,
    pub mode: Mode,

    // Input state
    pub input_buffer: String,
    pub settings_draft: SettingsDraft,
    pub notification: Option<Notification>,

    /// Whether the keymap legend is expanded (toggled by '?')
    pub show_keymap: bool,

    /// Number of bells requested so far; the render thread rings on change.
    pub bell_count: u64,

    // Dirty flag - set when state changes and render is needed
    pub dirty: bool,

    // Config (immutable after init)
    pub config: Config,
}

impl Model {
    pub fn new(config: Config, durations: Durations) -> Self {
        Self {
            clock: PhaseClock::new(durations),
            status: TimerStatus::default(),
            mode: Mode::default(),
            input_buffer: String::new(),
            settings_draft: SettingsDraft::default(),
            notification: None,
            show_keymap: false,
            bell_count: 0,
            dirty: true,
            config,
        }
    }

    /// Text for the status line: "Ready", "Paused" or the phase label.
    pub fn status_label(&self) -> &'static str {
        match self.status {
            TimerStatus::Ready => "Ready",
            TimerStatus::Paused => "Paused",
            TimerStatus::Active => self.clock.phase_label(),
        }
    }

    /// Create an immutable snapshot for the render thread.
    ///
    /// Each snapshot gets a monotonically increasing version number,
    /// enabling the render thread to skip redundant renders.
    pub fn snapshot(&self) -> RenderState {
        RenderState {
            version: next_version(),
            phase: self.clock.phase(),
            status_label: self.status_label(),
            time_text: format_mm_ss(self.clock.time_remaining_secs()),
            progress: self.clock.progress_fraction(),
            completed_work_intervals: self.clock.completed_work_intervals(),
            running: self.clock.is_running(),
            durations: self.clock.durations(),
            mode: self.mode,
            input_buffer: self.input_buffer.clone(),
            settings_draft: self.settings_draft.clone(),
            notification: self.notification.clone(),
            show_keymap: self.show_keymap,
            bell_count: self.bell_count,
        }
    }
}
