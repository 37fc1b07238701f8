//! Goal row model and DTOs.

use serde::Deserialize;
use sleeptrack_core::error::CoreError;
use sleeptrack_core::goal::{validate_goal_type, validate_goal_value, Goal};
use sleeptrack_core::types::{EntityId, Timestamp, UserId};
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `goals` table.
#[derive(Debug, Clone, FromRow)]
pub struct GoalRow {
    pub id: EntityId,
    pub user_id: UserId,
    #[sqlx(rename = "type")]
    pub goal_type: String,
    pub value: String,
    pub created_at: Timestamp,
}

impl From<GoalRow> for Goal {
    fn from(row: GoalRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            goal_type: row.goal_type,
            value: row.value,
            created_at: row.created_at,
        }
    }
}

/// DTO for setting a goal.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGoal {
    #[serde(rename = "type")]
    pub goal_type: String,
    pub value: String,
}

impl CreateGoal {
    /// Only the type is checked strictly; the value just has to be present.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_goal_type(&self.goal_type)?;
        validate_goal_value(&self.value)
    }

    /// Build the entity to store for `user_id`.
    pub fn into_goal(self, user_id: &str, now: Timestamp) -> Goal {
        Goal {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            goal_type: self.goal_type,
            value: self.value,
            created_at: now,
        }
    }
}
