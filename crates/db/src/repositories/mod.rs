//! Repository layer.
//!
//! [`SleepLogRepository`] and [`GoalRepository`] are the seams the API
//! depends on. The PostgreSQL implementations are zero-sized structs
//! providing async queries that accept `&PgPool` as the first argument,
//! wrapped by [`PgStorage`] to satisfy the traits.

pub mod goal_repo;
pub mod pg_storage;
pub mod sleep_log_repo;

use async_trait::async_trait;
use sleeptrack_core::goal::Goal;
use sleeptrack_core::sleep::SleepLog;

use crate::StorageError;

pub use goal_repo::GoalRepo;
pub use pg_storage::PgStorage;
pub use sleep_log_repo::SleepLogRepo;

/// Storage for sleep logs.
#[async_trait]
pub trait SleepLogRepository: Send + Sync {
    /// Persist a new log.
    async fn save_sleep_log(&self, log: &SleepLog) -> Result<(), StorageError>;

    /// All of a user's logs, sorted by `start_time` newest first.
    ///
    /// The goal progress engine relies on this ordering.
    async fn list_sleep_logs(&self, user_id: &str) -> Result<Vec<SleepLog>, StorageError>;
}

/// Storage for goals.
#[async_trait]
pub trait GoalRepository: Send + Sync {
    /// Persist a goal, making it the user's current goal.
    async fn save_goal(&self, goal: &Goal) -> Result<(), StorageError>;

    /// The user's most recently created goal, if any.
    async fn current_goal(&self, user_id: &str) -> Result<Option<Goal>, StorageError>;
}
