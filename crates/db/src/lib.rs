//! Persistence for sleep logs and goals.
//!
//! Two backends sit behind the [`repositories::SleepLogRepository`] and
//! [`repositories::GoalRepository`] traits: PostgreSQL via sqlx, and a
//! pair of JSON files ([`file_store::FileStore`]). [`backend::Repositories`]
//! opens whichever one is configured.

use std::path::PathBuf;

use sqlx::postgres::PgPoolOptions;

pub mod backend;
pub mod file_store;
pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Errors raised by either storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the pool can reach the server.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
