//! Pure update function for the TEA (The Elm Architecture) pattern.
//!
//! The update function takes a model and a message, mutates the model,
//! and returns a list of commands to execute.

use crossterm::event::{KeyCode, KeyEvent};

use crate::alert::Alert;
use crate::core::{PhaseTransition, Tick};
use crate::{plog, plog_debug, plog_trace, plog_warn};

use super::command::Command;
use super::message::Message;
use super::model::{
    Mode, Model, Notification, NotificationLevel, SettingsDraft, SettingsField, TimerStatus,
};

/// Helper to set an error notification and mark model as dirty.
fn set_error(model: &mut Model, message: String) {
    plog_warn!("UI Error: {}", message);
    model.notification = Some(Notification {
        level: NotificationLevel::Error,
        message,
    });
    model.dirty = true;
}

fn set_info(model: &mut Model, message: String) {
    model.notification = Some(Notification {
        level: NotificationLevel::Info,
        message,
    });
    model.dirty = true;
}

/// Pure update function: Model + Message → Commands
///
/// This function:
/// 1. Takes the current model and an input message
/// 2. Mutates the model state (and sets dirty flag)
/// 3. Returns a list of commands (side effects) to execute
///
/// The function itself has no side effects - all I/O happens via returned Commands.
pub fn update(model: &mut Model, msg: Message) -> Vec<Command> {
    let mut cmds = Vec::new();

    match msg {
        Message::Key(key) => {
            model.notification = None; // Clear notification on any key press
            model.dirty = true;
            match model.mode {
                Mode::Clock => update_clock_mode(model, key, &mut cmds),
                Mode::Settings(field) => update_settings_mode(model, key, field),
            }
        }

        Message::Resize(_, _) => {
            model.dirty = true;
        }

        Message::Tick => match model.clock.tick() {
            Tick::Idle => {
                plog_trace!("Message::Tick ignored (paused)");
            }
            Tick::Progress(fraction) => {
                plog_trace!(
                    "Message::Tick remaining={} progress={:.3}",
                    model.clock.time_remaining_secs(),
                    fraction
                );
                model.dirty = true;
            }
            Tick::Completed(transition) => on_phase_completed(model, transition, &mut cmds),
        },
    }

    cmds
}

fn on_phase_completed(model: &mut Model, transition: PhaseTransition, cmds: &mut Vec<Command>) {
    plog!(
        "Phase complete: {} -> {} (completed work intervals: {})",
        transition.from,
        transition.to,
        transition.completed_work_intervals
    );

    let alert = Alert::for_transition(&transition);
    model.status = TimerStatus::Active;
    set_info(model, alert.summary());
    cmds.push(Command::Alert(alert));

    if model.config.auto_start {
        plog_debug!("Auto-starting {}", transition.to);
        model.clock.start();
    }
}

fn update_clock_mode(model: &mut Model, key: KeyEvent, cmds: &mut Vec<Command>) {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => {
            if model.clock.toggle() {
                plog_debug!("Clock started phase={}", model.clock.phase());
                model.status = TimerStatus::Active;
            } else {
                plog_debug!(
                    "Clock paused remaining={}",
                    model.clock.time_remaining_secs()
                );
                model.status = TimerStatus::Paused;
            }
        }

        KeyCode::Char('r') => {
            plog_debug!("Clock reset");
            model.clock.reset();
            model.status = TimerStatus::Ready;
        }

        KeyCode::Char('s') => {
            model.settings_draft = SettingsDraft::from_durations(model.clock.durations());
            model.mode = Mode::Settings(SettingsField::Work);
            load_field_buffer(model, SettingsField::Work);
        }

        KeyCode::Char('q') | KeyCode::Esc => {
            cmds.push(Command::Quit);
        }

        KeyCode::Char('?') => {
            model.show_keymap = !model.show_keymap;
        }

        _ => {}
    }
}

fn update_settings_mode(model: &mut Model, key: KeyEvent, field: SettingsField) {
    match key.code {
        KeyCode::Enter => {
            store_current_field(model, field);
            apply_settings(model, field);
        }

        KeyCode::Tab => {
            store_current_field(model, field);
            let next = field.next();
            model.mode = Mode::Settings(next);
            load_field_buffer(model, next);
        }

        KeyCode::Esc => {
            model.input_buffer.clear();
            model.settings_draft = SettingsDraft::default();
            model.mode = Mode::Clock;
        }

        KeyCode::Backspace => {
            model.input_buffer.pop();
        }

        KeyCode::Char(c) => {
            model.input_buffer.push(c);
        }

        _ => {}
    }
}

/// Validate the draft and hand it to the clock. On failure the dialog stays
/// open on the same field with the user's text intact.
fn apply_settings(model: &mut Model, field: SettingsField) {
    let result = model
        .settings_draft
        .parse()
        .and_then(|(work, brk, long_break)| model.clock.configure(work, brk, long_break));

    match result {
        Ok(()) => {
            let d = model.clock.durations();
            plog!(
                "Settings applied: work={} break={} long_break={}",
                d.work(),
                d.brk(),
                d.long_break()
            );
            model.input_buffer.clear();
            model.settings_draft = SettingsDraft::default();
            model.mode = Mode::Clock;
            set_info(
                model,
                format!(
                    "Settings applied: {} / {} / {} min",
                    d.work(),
                    d.brk(),
                    d.long_break()
                ),
            );
        }
        Err(e) => {
            load_field_buffer(model, field);
            let message = match e {
                crate::Error::Validation(msg) => msg,
                other => other.to_string(),
            };
            set_error(model, message);
        }
    }
}

/// Store current input buffer into the draft.
fn store_current_field(model: &mut Model, field: SettingsField) {
    let value = std::mem::take(&mut model.input_buffer);
    model.settings_draft.set(field, value);
}

/// Load the draft value of `field` into the input buffer.
fn load_field_buffer(model: &mut Model, field: SettingsField) {
    model.input_buffer = model.settings_draft.get(field).to_string();
}
