//! Messages for the TEA (The Elm Architecture) pattern.
//!
//! Messages are inputs to the update function - they come from external sources
//! like keyboard events or the ticker actor.

use crossterm::event::KeyEvent;

/// Input messages to the update function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Keyboard/terminal events
    Key(KeyEvent),
    Resize(u16, u16),

    /// One second elapsed while the clock was running (from the ticker actor).
    Tick,
}
