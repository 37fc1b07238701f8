//! Sleep goals and the goal progress engine.
//!
//! A goal's `value` is free text whose grammar depends on its `type`:
//!
//! | Type          | Example       | Met when                              |
//! |---------------|---------------|---------------------------------------|
//! | `duration`    | `"7.5h"`      | slept at least 7.5 hours              |
//! | `consistency` | `"before 23"` | went to bed before 23:00 UTC          |
//! | `quality`     | `"> 6"`       | rated the night strictly above 6      |
//!
//! Only the type is validated when a goal is written. The value is parsed
//! leniently each time progress is evaluated ([`target`]), then matched
//! against the logs inside the lookback window ([`window`]) one day at a
//! time ([`evaluator`]) and folded into a report ([`progress`]).

pub mod evaluator;
pub mod progress;
pub mod target;
pub mod window;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{EntityId, Timestamp, UserId};

pub use progress::{evaluate_goal_progress, DayVerdict, GoalProgress};
pub use target::GoalTarget;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const GOAL_TYPE_DURATION: &str = "duration";
pub const GOAL_TYPE_CONSISTENCY: &str = "consistency";
pub const GOAL_TYPE_QUALITY: &str = "quality";

/// Goal types accepted at write time.
pub const VALID_GOAL_TYPES: &[&str] = &[GOAL_TYPE_DURATION, GOAL_TYPE_CONSISTENCY, GOAL_TYPE_QUALITY];

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A user-defined sleep goal.
///
/// `goal_type` stays a plain string so that rows written before a type was
/// retired still load; they evaluate as [`GoalTarget::Unsupported`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: EntityId,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub goal_type: String,
    pub value: String,
    pub created_at: Timestamp,
}

/// Resolve the user's current goal: the most recently created one.
///
/// Goals created at the same instant are ordered by `id`, so the result does
/// not depend on iteration order.
pub fn latest_goal<'a, I>(goals: I) -> Option<&'a Goal>
where
    I: IntoIterator<Item = &'a Goal>,
{
    goals.into_iter().max_by_key(|g| (g.created_at, g.id))
}

/// Turn a missing goal into the distinct "no goal configured" error.
///
/// Progress is never computed for a user without a goal; an empty report
/// would be indistinguishable from a goal with zero compliant days.
pub fn require_goal(user_id: &str, goal: Option<Goal>) -> Result<Goal, CoreError> {
    goal.ok_or_else(|| CoreError::GoalNotSet {
        user_id: user_id.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that `goal_type` is one of [`VALID_GOAL_TYPES`].
pub fn validate_goal_type(goal_type: &str) -> Result<(), CoreError> {
    if VALID_GOAL_TYPES.contains(&goal_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid goal type '{goal_type}'. Must be one of: {}",
            VALID_GOAL_TYPES.join(", ")
        )))
    }
}

/// Validate that a goal value is present. Its grammar is not checked here.
pub fn validate_goal_value(value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation("Goal value required".into()));
    }
    Ok(())
}
