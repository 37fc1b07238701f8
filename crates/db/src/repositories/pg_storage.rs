//! PostgreSQL-backed implementation of the repository traits.

use async_trait::async_trait;
use sleeptrack_core::goal::Goal;
use sleeptrack_core::sleep::SleepLog;

use super::{GoalRepo, GoalRepository, SleepLogRepo, SleepLogRepository};
use crate::{DbPool, StorageError};

/// Delegates to [`SleepLogRepo`] and [`GoalRepo`] over a shared pool.
#[derive(Clone)]
pub struct PgStorage {
    pool: DbPool,
}

impl PgStorage {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl SleepLogRepository for PgStorage {
    async fn save_sleep_log(&self, log: &SleepLog) -> Result<(), StorageError> {
        let stored = SleepLogRepo::create(&self.pool, log).await?;
        tracing::debug!(sleep_log_id = %stored.id, user_id = %stored.user_id, "Sleep log inserted");
        Ok(())
    }

    async fn list_sleep_logs(&self, user_id: &str) -> Result<Vec<SleepLog>, StorageError> {
        Ok(SleepLogRepo::list_for_user(&self.pool, user_id).await?)
    }
}

#[async_trait]
impl GoalRepository for PgStorage {
    async fn save_goal(&self, goal: &Goal) -> Result<(), StorageError> {
        let stored = GoalRepo::create(&self.pool, goal).await?;
        tracing::debug!(goal_id = %stored.id, user_id = %stored.user_id, "Goal inserted");
        Ok(())
    }

    async fn current_goal(&self, user_id: &str) -> Result<Option<Goal>, StorageError> {
        Ok(GoalRepo::find_latest_for_user(&self.pool, user_id).await?)
    }
}
