//! Phase identity for the Pomodoro cycle.
//!
//! A phase is the kind of interval currently counting down. Work phases
//! alternate with breaks, and every fourth completed work interval earns a
//! long break instead of a short one.

/// Number of completed work intervals that earn a long break.
pub const LONG_BREAK_EVERY: u32 = 4;

/// Kind of interval currently counting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Focused work interval.
    #[default]
    Work,
    /// Short break after a work interval.
    Break,
    /// Extended break after every fourth work interval.
    LongBreak,
}

impl Phase {
    /// Human-readable label shown next to the countdown.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Work => "Work",
            Phase::Break => "Break",
            Phase::LongBreak => "Long Break",
        }
    }

    pub fn is_break(&self) -> bool {
        !matches!(self, Phase::Work)
    }

    /// Phase that follows this one once it expires.
    ///
    /// `completed_work_intervals` is the count *after* the expiring phase
    /// has been accounted for, so a Work phase ending as the fourth
    /// completion yields `LongBreak`.
    pub fn next(&self, completed_work_intervals: u32) -> Phase {
        match self {
            Phase::Work if completed_work_intervals % LONG_BREAK_EVERY == 0 => Phase::LongBreak,
            Phase::Work => Phase::Break,
            Phase::Break | Phase::LongBreak => Phase::Work,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
