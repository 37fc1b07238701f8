//! Goal progress reports.

use chrono::NaiveDate;
use serde::Serialize;

use super::evaluator::evaluate_window;
use super::target::GoalTarget;
use super::window::select_window;
use super::Goal;
use crate::sleep::{lookback_cutoff, SleepLog};
use crate::types::Timestamp;

/// Compliance of a single night. `date` serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayVerdict {
    pub date: NaiveDate,
    pub met: bool,
}

/// Day-by-day compliance with a goal over the lookback window.
///
/// Always satisfies `met_days <= total_days == progress.len()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub goal: Goal,
    /// Newest first, matching the input logs.
    pub progress: Vec<DayVerdict>,
    pub met_days: usize,
    pub total_days: usize,
}

/// Fold verdicts into a report without reordering them.
pub fn aggregate(goal: Goal, progress: Vec<DayVerdict>) -> GoalProgress {
    let met_days = progress.iter().filter(|v| v.met).count();
    let total_days = progress.len();
    GoalProgress {
        goal,
        progress,
        met_days,
        total_days,
    }
}

/// Evaluate `goal` against the user's logs as of `now`.
///
/// `logs` must belong to the goal's user and be sorted newest first; see
/// [`select_window`].
pub fn evaluate_goal_progress(goal: &Goal, logs: &[SleepLog], now: Timestamp) -> GoalProgress {
    let target = GoalTarget::from_goal(goal);
    let window = select_window(logs, lookback_cutoff(now));
    aggregate(goal.clone(), evaluate_window(&target, window))
}
