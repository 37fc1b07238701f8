//! Storage backend selection.

use std::path::PathBuf;
use std::sync::Arc;

use crate::file_store::FileStore;
use crate::repositories::{GoalRepository, PgStorage, SleepLogRepository};
use crate::StorageError;

/// Where sleep logs and goals are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Two JSON files on local disk.
    File {
        sleep_file: PathBuf,
        goals_file: PathBuf,
    },
    /// A PostgreSQL database; migrations run on open.
    Postgres { database_url: String },
}

impl StorageBackend {
    /// Short name for logs: `"file"` or `"postgres"`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::File { .. } => "file",
            Self::Postgres { .. } => "postgres",
        }
    }
}

/// The pair of repositories handed to the API layer.
#[derive(Clone)]
pub struct Repositories {
    pub sleep_logs: Arc<dyn SleepLogRepository>,
    pub goals: Arc<dyn GoalRepository>,
}

impl Repositories {
    /// Use one store for both repositories.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: SleepLogRepository + GoalRepository + 'static,
    {
        Self {
            sleep_logs: store.clone(),
            goals: store,
        }
    }

    /// Open the configured backend.
    pub async fn open(backend: &StorageBackend) -> Result<Self, StorageError> {
        match backend {
            StorageBackend::File {
                sleep_file,
                goals_file,
            } => {
                let store = FileStore::open(sleep_file.clone(), goals_file.clone()).await?;
                Ok(Self::from_store(Arc::new(store)))
            }
            StorageBackend::Postgres { database_url } => {
                let pool = crate::create_pool(database_url).await?;
                tracing::info!("Database connection pool created");

                crate::health_check(&pool).await?;
                tracing::info!("Database health check passed");

                crate::run_migrations(&pool).await?;
                tracing::info!("Database migrations applied");

                Ok(Self::from_store(Arc::new(PgStorage::new(pool))))
            }
        }
    }
}
