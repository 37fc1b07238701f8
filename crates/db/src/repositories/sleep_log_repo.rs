//! Repository for the `sleep_logs` table.

use sleeptrack_core::sleep::SleepLog;
use sqlx::PgPool;

use crate::models::sleep_log::SleepLogRow;

/// Column list for `sleep_logs` queries.
const COLUMNS: &str = "\
    id, user_id, start_time, end_time, quality, \
    reason, interruptions, created_at";

/// Provides insert and list operations for sleep logs.
pub struct SleepLogRepo;

impl SleepLogRepo {
    /// Insert a new sleep log, returning the stored row.
    pub async fn create(pool: &PgPool, log: &SleepLog) -> Result<SleepLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO sleep_logs \
                (id, user_id, start_time, end_time, quality, \
                 reason, interruptions, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SleepLogRow>(&query)
            .bind(log.id)
            .bind(&log.user_id)
            .bind(log.start_time)
            .bind(log.end_time)
            .bind(log.quality)
            .bind(&log.reason)
            .bind(&log.interruptions)
            .bind(log.created_at)
            .fetch_one(pool)
            .await
            .map(SleepLog::from)
    }

    /// List a user's sleep logs, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: &str) -> Result<Vec<SleepLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sleep_logs \
             WHERE user_id = $1 \
             ORDER BY start_time DESC"
        );
        let rows = sqlx::query_as::<_, SleepLogRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(SleepLog::from).collect())
    }
}
