use std::sync::Arc;

use sleeptrack_db::backend::Repositories;
use sleeptrack_db::repositories::{GoalRepository, SleepLogRepository};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; everything lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Storage kind reported by `/health` (`"file"` or `"postgres"`).
    pub storage_kind: &'static str,
    pub sleep_logs: Arc<dyn SleepLogRepository>,
    pub goals: Arc<dyn GoalRepository>,
}

impl AppState {
    pub fn new(config: ServerConfig, repositories: Repositories) -> Self {
        Self {
            storage_kind: config.storage.kind(),
            config: Arc::new(config),
            sleep_logs: repositories.sleep_logs,
            goals: repositories.goals,
        }
    }
}
