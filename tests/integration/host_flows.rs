//! Keyboard-driven flows through the TEA update loop.

use crossterm::event::KeyCode;

use pomodoro::alert::Alert;
use pomodoro::core::{Durations, Phase};
use pomodoro::tea::{
    update, Command, Message, Mode, NotificationLevel, SettingsField, TimerStatus,
};

use crate::fixtures::{char_key, clear_field, feed, key, model_with, type_text};

#[test]
fn test_space_starts_and_pauses() {
    let mut model = model_with(Durations::default());
    assert_eq!(model.status_label(), "Ready");

    feed(&mut model, [char_key(' ')]);
    assert!(model.clock.is_running());
    assert_eq!(model.status, TimerStatus::Active);
    assert_eq!(model.status_label(), "Work");

    feed(&mut model, [char_key(' ')]);
    assert!(!model.clock.is_running());
    assert_eq!(model.status_label(), "Paused");
}

#[test]
fn test_full_work_interval_emits_single_alert() {
    let mut model = model_with(Durations::new(1, 1, 1).unwrap());
    feed(&mut model, [char_key(' ')]);

    let cmds = feed(&mut model, (0..60).map(|_| Message::Tick));

    assert_eq!(cmds, vec![Command::Alert(Alert::WORK_COMPLETE)]);
    assert_eq!(model.clock.phase(), Phase::Break);
    assert!(!model.clock.is_running());
    assert_eq!(model.status_label(), "Break");

    let notification = model.notification.as_ref().unwrap();
    assert_eq!(notification.level, NotificationLevel::Info);
    assert!(notification.message.contains("Pomodoro complete!"));
}

#[test]
fn test_break_end_emits_break_over_alert() {
    let mut model = model_with(Durations::new(1, 1, 1).unwrap());
    feed(&mut model, [char_key(' ')]);
    feed(&mut model, (0..60).map(|_| Message::Tick));

    // Paused at the start of the break until the user resumes
    assert!(feed(&mut model, (0..10).map(|_| Message::Tick)).is_empty());

    feed(&mut model, [char_key(' ')]);
    let cmds = feed(&mut model, (0..60).map(|_| Message::Tick));
    assert_eq!(cmds, vec![Command::Alert(Alert::BREAK_OVER)]);
    assert_eq!(model.clock.phase(), Phase::Work);
}

#[test]
fn test_auto_start_runs_through_phase_changes() {
    let mut model = model_with(Durations::new(1, 1, 1).unwrap());
    model.config.auto_start = true;
    feed(&mut model, [char_key(' ')]);

    let cmds = feed(&mut model, (0..120).map(|_| Message::Tick));

    assert_eq!(
        cmds,
        vec![
            Command::Alert(Alert::WORK_COMPLETE),
            Command::Alert(Alert::BREAK_OVER)
        ]
    );
    assert!(model.clock.is_running());
    assert_eq!(model.clock.phase(), Phase::Work);
}

#[test]
fn test_reset_key_restores_ready_state() {
    let mut model = model_with(Durations::new(1, 1, 1).unwrap());
    feed(&mut model, [char_key(' ')]);
    feed(&mut model, (0..90).map(|_| Message::Tick));

    feed(&mut model, [char_key('r')]);

    assert_eq!(model.clock.phase(), Phase::Work);
    assert_eq!(model.clock.completed_work_intervals(), 0);
    assert_eq!(model.clock.time_remaining_secs(), 60);
    assert_eq!(model.status_label(), "Ready");
    assert_eq!(model.snapshot().time_text, "01:00");
}

#[test]
fn test_settings_dialog_applies_new_durations() {
    let mut model = model_with(Durations::default());
    feed(&mut model, [char_key('s')]);
    assert_eq!(model.mode, Mode::Settings(SettingsField::Work));
    assert_eq!(model.input_buffer, "25");

    clear_field(&mut model);
    type_text(&mut model, "10");
    feed(&mut model, [key(KeyCode::Tab)]);
    clear_field(&mut model);
    type_text(&mut model, "2");
    feed(&mut model, [key(KeyCode::Tab)]);
    clear_field(&mut model);
    type_text(&mut model, "20");
    let cmds = feed(&mut model, [key(KeyCode::Enter)]);

    assert!(cmds.is_empty());
    assert_eq!(model.mode, Mode::Clock);
    assert_eq!(model.clock.durations(), Durations::new(10, 2, 20).unwrap());
    assert_eq!(model.clock.time_remaining_secs(), 600);
    assert_eq!(
        model.notification.as_ref().map(|n| n.level),
        Some(NotificationLevel::Info)
    );
}

#[test]
fn test_invalid_settings_keep_dialog_open() {
    let mut model = model_with(Durations::default());
    feed(&mut model, [char_key('s'), key(KeyCode::Tab)]);
    clear_field(&mut model);
    type_text(&mut model, "abc");
    feed(&mut model, [key(KeyCode::Enter)]);

    assert_eq!(model.mode, Mode::Settings(SettingsField::Break));
    assert_eq!(model.input_buffer, "abc");
    assert_eq!(model.clock.durations(), Durations::default());
    let notification = model.notification.as_ref().unwrap();
    assert_eq!(notification.level, NotificationLevel::Error);
    assert_eq!(notification.message, "Please enter valid positive integers.");

    // Fix the value and apply
    clear_field(&mut model);
    type_text(&mut model, "7");
    feed(&mut model, [key(KeyCode::Enter)]);
    assert_eq!(model.mode, Mode::Clock);
    assert_eq!(model.clock.durations().brk(), 7);
}

#[test]
fn test_zero_in_settings_rejected() {
    let mut model = model_with(Durations::default());
    feed(&mut model, [char_key('s')]);
    clear_field(&mut model);
    type_text(&mut model, "0");
    feed(&mut model, [key(KeyCode::Enter)]);

    assert!(matches!(model.mode, Mode::Settings(_)));
    assert_eq!(model.clock.durations().work(), 25);
}

#[test]
fn test_escape_from_settings_leaves_clock_untouched() {
    let mut model = model_with(Durations::default());
    feed(&mut model, [char_key(' ')]);
    feed(&mut model, (0..5).map(|_| Message::Tick));

    feed(&mut model, [char_key('s')]);
    clear_field(&mut model);
    type_text(&mut model, "50");
    let cmds = feed(&mut model, [key(KeyCode::Esc)]);

    assert!(cmds.is_empty(), "Esc in settings must not quit");
    assert_eq!(model.mode, Mode::Clock);
    assert_eq!(model.clock.durations(), Durations::default());
    assert_eq!(model.clock.time_remaining_secs(), 1495);
}

#[test]
fn test_clock_keeps_ticking_while_settings_open() {
    let mut model = model_with(Durations::default());
    feed(&mut model, [char_key(' '), char_key('s')]);
    feed(&mut model, (0..3).map(|_| Message::Tick));
    assert_eq!(model.clock.time_remaining_secs(), 1497);
}

#[test]
fn test_quit_keys() {
    let mut model = model_with(Durations::default());
    assert_eq!(update(&mut model, char_key('q')), vec![Command::Quit]);
    assert_eq!(update(&mut model, key(KeyCode::Esc)), vec![Command::Quit]);
}

#[test]
fn test_snapshot_tracks_countdown() {
    let mut model = model_with(Durations::default());
    feed(&mut model, [char_key(' ')]);
    feed(&mut model, (0..75).map(|_| Message::Tick));

    let state = model.snapshot();
    assert_eq!(state.time_text, "23:45");
    assert_eq!(state.status_label, "Work");
    assert!(state.running);
    assert!((state.progress - 75.0 / 1500.0).abs() < 1e-12);
}
