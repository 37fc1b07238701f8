//! Sleep log row model and DTOs.

use serde::Deserialize;
use sleeptrack_core::error::CoreError;
use sleeptrack_core::sleep::{validate_new_sleep_log, SleepLog};
use sleeptrack_core::types::{EntityId, Timestamp, UserId};
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `sleep_logs` table.
#[derive(Debug, Clone, FromRow)]
pub struct SleepLogRow {
    pub id: EntityId,
    pub user_id: UserId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub quality: i32,
    pub reason: Option<String>,
    pub interruptions: Vec<String>,
    pub created_at: Timestamp,
}

impl From<SleepLogRow> for SleepLog {
    fn from(row: SleepLogRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            start_time: row.start_time,
            end_time: row.end_time,
            quality: row.quality,
            reason: row.reason,
            interruptions: row.interruptions,
            created_at: row.created_at,
        }
    }
}

/// DTO for recording a new sleep session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSleepLog {
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub quality: i32,
    pub reason: Option<String>,
    #[serde(default)]
    pub interruptions: Vec<String>,
}

impl CreateSleepLog {
    /// Check the write-time rules from `sleeptrack_core::sleep`.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_new_sleep_log(
            self.start_time,
            self.end_time,
            self.quality,
            &self.interruptions,
        )
    }

    /// Build the entity to store for `user_id`. Blank reasons are dropped.
    pub fn into_sleep_log(self, user_id: &str, now: Timestamp) -> SleepLog {
        SleepLog {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            start_time: self.start_time,
            end_time: self.end_time,
            quality: self.quality,
            reason: self.reason.filter(|r| !r.trim().is_empty()),
            interruptions: self.interruptions,
            created_at: now,
        }
    }
}
