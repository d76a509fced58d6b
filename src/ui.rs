//! Terminal UI rendering for the timer.
//!
//! Layout, top to bottom:
//! - Clock face: circular progress arc with the remaining time in the centre
//! - Separator
//! - HUD: status, completed intervals, gauge, configured durations
//! - Status bar: keymap legend or the settings input line
//!
//! This module renders from RenderState (immutable snapshot) - it never
//! mutates application state.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Points},
        Clear, Gauge, Paragraph,
    },
    Frame,
};

use crate::arc::{arc_points, ArcGeometry};
use crate::core::Phase;
use crate::render::RenderState;
use crate::tea::{Mode, Notification, NotificationLevel, SettingsField};

const COLOR_TEXT_DIMMED: Color = Color::Gray;
const COLOR_TEXT_MUTED: Color = Color::DarkGray;
const COLOR_SEPARATOR: Color = Color::White;
const COLOR_TRACK: Color = Color::DarkGray;

// Phase accent colors
const COLOR_WORK: Color = Color::Red;
const COLOR_BREAK: Color = Color::Green;
const COLOR_LONG_BREAK: Color = Color::Cyan;

const HUD_HEIGHT: u16 = 3;
const FACE_RADIUS: f64 = 10.0;
/// Canvas space around the circle, as a multiple of the radius.
const FACE_MARGIN: f64 = 1.25;
const ARC_STEPS: usize = 720;

fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Work => COLOR_WORK,
        Phase::Break => COLOR_BREAK,
        Phase::LongBreak => COLOR_LONG_BREAK,
    }
}

// -----------------------------------------------------------------------------
// Context-sensitive keymap system
// -----------------------------------------------------------------------------

/// Context for determining which keybindings to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapContext {
    Clock { running: bool },
    Settings,
}

impl KeymapContext {
    pub fn from_render_state(state: &RenderState) -> Self {
        match state.mode {
            Mode::Clock => KeymapContext::Clock {
                running: state.running,
            },
            Mode::Settings(_) => KeymapContext::Settings,
        }
    }
}

/// A single keybinding entry for display.
struct Keybinding(&'static str, &'static str);

/// A group of related keybindings (separated by │).
struct KeybindingGroup(Vec<Keybinding>);

fn keybindings_for_context(ctx: KeymapContext) -> Vec<KeybindingGroup> {
    match ctx {
        KeymapContext::Clock { running } => {
            let toggle = if running { "pause" } else { "start" };
            vec![
                KeybindingGroup(vec![Keybinding("space", toggle)]),
                KeybindingGroup(vec![Keybinding("r", "reset"), Keybinding("s", "settings")]),
                KeybindingGroup(vec![Keybinding("q", "quit")]),
            ]
        }
        KeymapContext::Settings => vec![KeybindingGroup(vec![
            Keybinding("Enter", "apply"),
            Keybinding("Tab", "next"),
            Keybinding("Esc", "cancel"),
        ])],
    }
}

/// Main render function - entry point for all UI drawing.
pub fn draw(frame: &mut Frame, state: &RenderState) {
    render_main_layout(frame, state);

    if let Some(ref notification) = state.notification {
        render_notification(frame, notification, frame.area());
    }
}

fn render_main_layout(frame: &mut Frame, state: &RenderState) {
    let area = frame.area();

    if area.height < HUD_HEIGHT + 2 {
        render_hud(frame, state, area);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(HUD_HEIGHT),
        Constraint::Length(1),
    ])
    .split(area);

    render_face(frame, state, chunks[0]);
    render_separator(frame, chunks[1]);
    render_hud(frame, state, chunks[2]);
    render_statusbar(frame, state, chunks[3]);
}

/// Canvas bounds that keep the circle round on ~1:2 terminal cells.
///
/// Returns `(x_bounds, y_bounds)`. The shorter screen dimension fits the
/// circle plus margin; the other axis is widened to match.
fn face_bounds(width: u16, height: u16) -> ([f64; 2], [f64; 2]) {
    let half = FACE_RADIUS * FACE_MARGIN;
    let width = f64::from(width.max(1));
    let height = f64::from(height.max(1)) * 2.0;

    if width >= height {
        let half_x = half * width / height;
        ([-half_x, half_x], [-half, half])
    } else {
        let half_y = half * height / width;
        ([-half, half], [-half_y, half_y])
    }
}

/// Render the clock face: faint track, progress arc, time and status text.
fn render_face(frame: &mut Frame, state: &RenderState, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let (x_bounds, y_bounds) = face_bounds(area.width, area.height);
    let units_per_col = (x_bounds[1] - x_bounds[0]) / f64::from(area.width);
    let units_per_row = (y_bounds[1] - y_bounds[0]) / f64::from(area.height);

    // Canvas y grows upward; arc geometry uses screen coordinates (y down).
    let arc: Vec<(f64, f64)> = arc_points(state.progress, FACE_RADIUS, ARC_STEPS)
        .into_iter()
        .map(|(x, y)| (x, -y))
        .collect();
    let head: Vec<(f64, f64)> = if arc.is_empty() {
        Vec::new()
    } else {
        let (x, y) = ArcGeometry::from_fraction(state.progress, FACE_RADIUS).end;
        vec![(x, -y)]
    };
    let accent = phase_color(state.phase);

    let time_text = state.time_text.clone();
    let status_text = state.status_label.to_string();
    let time_x = -(time_text.chars().count() as f64) * units_per_col / 2.0;
    let status_x = -(status_text.chars().count() as f64) * units_per_col / 2.0;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: FACE_RADIUS,
                color: COLOR_TRACK,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &arc,
                color: accent,
            });
            ctx.draw(&Points {
                coords: &head,
                color: Color::White,
            });
            ctx.print(
                time_x,
                units_per_row,
                Line::styled(
                    time_text.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            );
            ctx.print(
                status_x,
                -units_per_row,
                Line::styled(status_text.clone(), Style::default().fg(accent)),
            );
        });

    frame.render_widget(canvas, area);
}

fn render_separator(frame: &mut Frame, area: Rect) {
    let solid = "─".repeat(area.width as usize);
    let line = Line::from(Span::styled(solid, Style::default().fg(COLOR_SEPARATOR)));
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the HUD: status summary, progress gauge and configured durations.
fn render_hud(frame: &mut Frame, state: &RenderState, area: Rect) {
    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(area);

    frame.render_widget(Paragraph::new(summary_line(state)), rows[0]);

    if rows[1].height > 0 {
        let gauge = Gauge::default()
            .gauge_style(
                Style::default()
                    .fg(phase_color(state.phase))
                    .bg(COLOR_TRACK),
            )
            .ratio(state.progress.clamp(0.0, 1.0))
            .label(format!("{}%", state.progress_percentage()));
        frame.render_widget(gauge, rows[1]);
    }

    if rows[2].height > 0 {
        frame.render_widget(Paragraph::new(durations_line(state)), rows[2]);
    }
}

fn summary_line(state: &RenderState) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            state.status_label,
            Style::default()
                .fg(phase_color(state.phase))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ", Style::default()),
        Span::styled(state.time_text.clone(), Style::default()),
        Span::styled("  │  ", Style::default().fg(COLOR_TEXT_MUTED)),
        Span::styled(
            format!("Pomodoros: {}", state.completed_work_intervals),
            Style::default().fg(COLOR_TEXT_DIMMED),
        ),
    ])
}

fn durations_line(state: &RenderState) -> Line<'static> {
    let d = state.durations;
    Line::from(Span::styled(
        format!(
            "Work {} min • Break {} min • Long Break {} min",
            d.work(),
            d.brk(),
            d.long_break()
        ),
        Style::default().fg(COLOR_TEXT_MUTED),
    ))
}

fn render_statusbar(frame: &mut Frame, state: &RenderState, area: Rect) {
    let line = match state.mode {
        Mode::Settings(field) => render_settings_line(state, field),
        Mode::Clock => render_keymap_line(state),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Render keybindings legend for the bottom line.
/// When show_keymap is false: Shows just "?" (grayed out)
/// When show_keymap is true: Shows "? │ <full keymap legend>" with bright "?"
fn render_keymap_line(state: &RenderState) -> Line<'static> {
    let ctx = KeymapContext::from_render_state(state);
    let groups = keybindings_for_context(ctx);

    let key_style = Style::default().fg(COLOR_TEXT_DIMMED);
    let desc_style = Style::default().fg(COLOR_TEXT_MUTED);
    let sep_style = Style::default().fg(COLOR_TEXT_MUTED);

    let help_style = if state.show_keymap {
        Style::default()
    } else {
        Style::default().fg(COLOR_TEXT_MUTED)
    };
    let mut spans: Vec<Span> = vec![Span::styled("?", help_style)];

    if state.show_keymap {
        for group in groups.iter() {
            spans.push(Span::styled(" │ ", sep_style));
            for (key_idx, keybinding) in group.0.iter().enumerate() {
                if key_idx > 0 {
                    spans.push(Span::styled(" • ", sep_style));
                }
                spans.push(Span::styled(keybinding.0, key_style));
                spans.push(Span::styled(format!(" {}", keybinding.1), desc_style));
            }
        }
    }

    Line::from(spans)
}

/// Render the settings dialog on the bottom line: all three fields, with the
/// active one showing the live input buffer and a cursor.
fn render_settings_line(state: &RenderState, active: SettingsField) -> Line<'static> {
    let hint_style = Style::default().fg(COLOR_TEXT_MUTED);
    let label_style = Style::default().fg(Color::Reset);
    let value_style = Style::default().fg(COLOR_TEXT_DIMMED);
    let input_style = Style::default().fg(Color::White);
    let cursor_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::SLOW_BLINK);

    let mut spans: Vec<Span> = vec![
        Span::styled("Enter ", hint_style),
        Span::styled("• ", hint_style),
        Span::styled("Tab ", hint_style),
        Span::styled("• ", hint_style),
        Span::styled("Esc ", hint_style),
        Span::styled(" ", hint_style),
    ];

    for (idx, field) in SettingsField::ALL.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled("  ", hint_style));
        }
        spans.push(Span::styled(format!("{}: ", field.label()), label_style));
        if *field == active {
            spans.push(Span::styled(state.input_buffer.clone(), input_style));
            spans.push(Span::styled("_", cursor_style));
        } else {
            spans.push(Span::styled(
                state.settings_draft.get(*field).to_string(),
                value_style,
            ));
        }
    }

    Line::from(spans)
}

/// Render notification message on the bottom line of the screen.
///
/// - Error: Red text with "Error:" prefix and bold styling
/// - Info: Green text without prefix
fn render_notification(frame: &mut Frame, notification: &Notification, area: Rect) {
    let notification_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1.min(area.height),
    };

    frame.render_widget(Clear, notification_area);

    let line = match notification.level {
        NotificationLevel::Error => Line::from(vec![
            Span::styled(
                "Error: ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                notification.message.clone(),
                Style::default().fg(Color::Red),
            ),
        ]),
        NotificationLevel::Info => Line::from(Span::styled(
            notification.message.clone(),
            Style::default().fg(Color::Green),
        )),
    };

    frame.render_widget(Paragraph::new(line), notification_area);
}
