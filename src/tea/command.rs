//! Commands for the TEA (The Elm Architecture) pattern.
//!
//! Commands are outputs from the update function - they represent side effects
//! to be executed by the runtime.

use crate::alert::Alert;

/// Output commands from the update function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A phase completed: ring the bell and show a desktop notification.
    Alert(Alert),

    // App lifecycle
    Quit,
}
