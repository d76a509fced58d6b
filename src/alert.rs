//! Phase-completion alerts: notification text and desktop delivery.
//!
//! The bell itself is rung by the render thread (it owns stdout); this
//! module decides *what* to announce and pushes desktop notifications.

use std::time::Duration;

use crate::core::PhaseTransition;
use crate::util::blocking_with_timeout;
use crate::{plog_debug, Error, Result};

const NOTIFY_TIMEOUT: Duration = Duration::from_secs(2);
const APP_NAME: &str = "Pomodoro";

/// Announcement for a phase change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alert {
    pub title: &'static str,
    pub body: &'static str,
}

impl Alert {
    pub const WORK_COMPLETE: Alert = Alert {
        title: "Pomodoro complete!",
        body: "Time for a break.",
    };

    pub const BREAK_OVER: Alert = Alert {
        title: "Break over",
        body: "Ready for the next Pomodoro.",
    };

    pub fn for_transition(transition: &PhaseTransition) -> Self {
        if transition.is_work_complete() {
            Self::WORK_COMPLETE
        } else {
            Self::BREAK_OVER
        }
    }

    /// Single-line form for the in-terminal notification bar.
    pub fn summary(&self) -> String {
        format!("{} {}", self.title, self.body)
    }
}

/// Show `alert` as a desktop notification.
pub async fn notify_desktop(alert: Alert) -> Result<()> {
    plog_debug!("notify_desktop title={}", alert.title);
    blocking_with_timeout(NOTIFY_TIMEOUT, move || {
        notify_rust::Notification::new()
            .appname(APP_NAME)
            .summary(alert.title)
            .body(alert.body)
            .show()
            .map(|_| ())
            .map_err(|e| Error::Notification(e.to_string()))
    })
    .await
}
