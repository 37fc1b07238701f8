//! Repository for the `goals` table.

use sleeptrack_core::goal::Goal;
use sqlx::PgPool;

use crate::models::goal::GoalRow;

/// Column list for `goals` queries.
const COLUMNS: &str = "id, user_id, type, value, created_at";

/// Provides insert and lookup operations for goals. Rows are never updated;
/// setting a new goal inserts a row that supersedes the previous ones.
pub struct GoalRepo;

impl GoalRepo {
    /// Insert a new goal, returning the stored row.
    pub async fn create(pool: &PgPool, goal: &Goal) -> Result<Goal, sqlx::Error> {
        let query = format!(
            "INSERT INTO goals (id, user_id, type, value, created_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GoalRow>(&query)
            .bind(goal.id)
            .bind(&goal.user_id)
            .bind(&goal.goal_type)
            .bind(&goal.value)
            .bind(goal.created_at)
            .fetch_one(pool)
            .await
            .map(Goal::from)
    }

    /// Find the user's most recently created goal.
    pub async fn find_latest_for_user(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Option<Goal>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM goals \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, GoalRow>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .map(|row| row.map(Goal::from))
    }
}
