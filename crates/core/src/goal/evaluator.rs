//! Per-night compliance checks.

use chrono::Timelike;

use super::progress::DayVerdict;
use super::target::GoalTarget;
use crate::sleep::SleepLog;

impl GoalTarget {
    /// Whether a single night satisfies this target.
    pub fn is_met(&self, log: &SleepLog) -> bool {
        match *self {
            Self::Duration(min_hours) => log.duration_hours() >= min_hours,
            Self::Consistency(before_hour) => i64::from(log.start_time.hour()) < before_hour,
            Self::Quality(above) => i64::from(log.quality) > above,
            Self::Unsupported => false,
        }
    }
}

/// Verdict for one night, dated by the UTC day the session started.
pub fn verdict_for(target: &GoalTarget, log: &SleepLog) -> DayVerdict {
    DayVerdict {
        date: log.start_time.date_naive(),
        met: target.is_met(log),
    }
}

/// Verdicts for every log in `window`, in the same order.
pub fn evaluate_window(target: &GoalTarget, window: &[SleepLog]) -> Vec<DayVerdict> {
    window.iter().map(|log| verdict_for(target, log)).collect()
}
