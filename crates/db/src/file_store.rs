//! JSON-file storage backend.
//!
//! Sleep logs and goals each live in a single JSON array on disk. The
//! whole data set is loaded into memory on open; every mutation updates the
//! in-memory index and then rewrites the affected file atomically (write
//! to `<file>.tmp`, fsync, rename). Writers are serialized by the lock.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sleeptrack_core::goal::{latest_goal, Goal};
use sleeptrack_core::sleep::SleepLog;
use sleeptrack_core::types::UserId;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use crate::repositories::{GoalRepository, SleepLogRepository};
use crate::StorageError;

#[derive(Debug, Default)]
struct Index {
    /// Per-user logs, kept sorted by `start_time` newest first.
    sleep_logs: BTreeMap<UserId, Vec<SleepLog>>,
    /// Per-user goals keyed by goal type; one goal per type.
    goals: BTreeMap<UserId, BTreeMap<String, Goal>>,
}

/// Stores sleep logs and goals in two JSON files.
#[derive(Debug)]
pub struct FileStore {
    sleep_file: PathBuf,
    goals_file: PathBuf,
    index: RwLock<Index>,
}

impl FileStore {
    /// Load both files, creating their parent directories if needed.
    ///
    /// Missing or empty files are treated as empty collections.
    pub async fn open(
        sleep_file: impl Into<PathBuf>,
        goals_file: impl Into<PathBuf>,
    ) -> Result<Self, StorageError> {
        let sleep_file = sleep_file.into();
        let goals_file = goals_file.into();

        ensure_parent_dir(&sleep_file).await?;
        ensure_parent_dir(&goals_file).await?;

        let logs: Vec<SleepLog> = read_json_array(&sleep_file).await?;
        let goals: Vec<Goal> = read_json_array(&goals_file).await?;

        tracing::info!(
            sleep_file = %sleep_file.display(),
            goals_file = %goals_file.display(),
            sleep_logs = logs.len(),
            goals = goals.len(),
            "File store loaded",
        );

        let mut index = Index::default();
        for log in logs {
            index
                .sleep_logs
                .entry(log.user_id.clone())
                .or_default()
                .push(log);
        }
        for user_logs in index.sleep_logs.values_mut() {
            user_logs.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        }
        for goal in goals {
            insert_goal(&mut index, goal);
        }

        Ok(Self {
            sleep_file,
            goals_file,
            index: RwLock::new(index),
        })
    }

    pub fn sleep_file(&self) -> &Path {
        &self.sleep_file
    }

    pub fn goals_file(&self) -> &Path {
        &self.goals_file
    }
}

#[async_trait]
impl SleepLogRepository for FileStore {
    async fn save_sleep_log(&self, log: &SleepLog) -> Result<(), StorageError> {
        let mut index = self.index.write().await;

        let user_logs = index.sleep_logs.entry(log.user_id.clone()).or_default();
        let pos = user_logs.partition_point(|l| l.start_time >= log.start_time);
        user_logs.insert(pos, log.clone());

        let all: Vec<&SleepLog> = index.sleep_logs.values().flatten().collect();
        if let Err(e) = write_json_atomic(&self.sleep_file, &all).await {
            // Keep memory consistent with what is on disk.
            if let Some(user_logs) = index.sleep_logs.get_mut(&log.user_id) {
                user_logs.remove(pos);
                if user_logs.is_empty() {
                    index.sleep_logs.remove(&log.user_id);
                }
            }
            return Err(e);
        }

        tracing::debug!(sleep_log_id = %log.id, user_id = %log.user_id, "Sleep log written");
        Ok(())
    }

    async fn list_sleep_logs(&self, user_id: &str) -> Result<Vec<SleepLog>, StorageError> {
        let index = self.index.read().await;
        Ok(index.sleep_logs.get(user_id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl GoalRepository for FileStore {
    async fn save_goal(&self, goal: &Goal) -> Result<(), StorageError> {
        let mut index = self.index.write().await;

        let replaced = index
            .goals
            .entry(goal.user_id.clone())
            .or_default()
            .insert(goal.goal_type.clone(), goal.clone());

        let all: Vec<&Goal> = index.goals.values().flat_map(|m| m.values()).collect();
        if let Err(e) = write_json_atomic(&self.goals_file, &all).await {
            if let Some(by_type) = index.goals.get_mut(&goal.user_id) {
                match replaced {
                    Some(previous) => {
                        by_type.insert(goal.goal_type.clone(), previous);
                    }
                    None => {
                        by_type.remove(&goal.goal_type);
                    }
                }
                if by_type.is_empty() {
                    index.goals.remove(&goal.user_id);
                }
            }
            return Err(e);
        }

        tracing::debug!(goal_id = %goal.id, user_id = %goal.user_id, goal_type = %goal.goal_type, "Goal written");
        Ok(())
    }

    async fn current_goal(&self, user_id: &str) -> Result<Option<Goal>, StorageError> {
        let index = self.index.read().await;
        Ok(index
            .goals
            .get(user_id)
            .and_then(|by_type| latest_goal(by_type.values()))
            .cloned())
    }
}

/// Keep the newer goal when a file contains several of the same type.
fn insert_goal(index: &mut Index, goal: Goal) {
    let by_type = index.goals.entry(goal.user_id.clone()).or_default();
    match by_type.get(&goal.goal_type) {
        Some(existing) if existing.created_at > goal.created_at => {}
        _ => {
            by_type.insert(goal.goal_type.clone(), goal);
        }
    }
}

async fn ensure_parent_dir(path: &Path) -> Result<(), StorageError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| StorageError::Io {
                    path: dir.to_path_buf(),
                    source,
                })
        }
        _ => Ok(()),
    }
}

async fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StorageError> {
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&contents).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })
}

async fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<(), StorageError> {
    let bytes = serde_json::to_vec_pretty(data).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let io_err = |source: std::io::Error| StorageError::Io {
        path: tmp_path.clone(),
        source,
    };

    let result = async {
        let mut file = tokio::fs::File::create(&tmp_path).await.map_err(io_err)?;
        file.write_all(&bytes).await.map_err(io_err)?;
        file.write_all(b"\n").await.map_err(io_err)?;
        file.sync_all().await.map_err(io_err)?;
        drop(file);
        tokio::fs::rename(&tmp_path, path)
            .await
            .map_err(|source| StorageError::Io {
                path: path.to_path_buf(),
                source,
            })
    }
    .await;

    if result.is_err() {
        let _ = tokio::fs::remove_file(&tmp_path).await;
    }
    result
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::TempDir;
    use uuid::Uuid;

    use super::*;

    fn sleep_log(user_id: &str) -> SleepLog {
        let start = Utc.with_ymd_and_hms(2026, 3, 10, 22, 0, 0).unwrap();
        SleepLog {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            start_time: start,
            end_time: start + Duration::hours(8),
            quality: 6,
            reason: None,
            interruptions: Vec::new(),
            created_at: start,
        }
    }

    fn goal(user_id: &str) -> Goal {
        Goal {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            goal_type: "duration".into(),
            value: "7h".into(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap(),
        }
    }

    /// Open a store whose files cannot be replaced: a directory sits at
    /// each target path, so the final rename fails.
    async fn unwritable_store(dir: &TempDir) -> FileStore {
        let sleep_file = dir.path().join("sleep_logs.json");
        let goals_file = dir.path().join("goals.json");
        let store = FileStore::open(&sleep_file, &goals_file).await.unwrap();
        std::fs::create_dir(&sleep_file).unwrap();
        std::fs::create_dir(&goals_file).unwrap();
        store
    }

    #[tokio::test]
    async fn failed_first_log_write_leaves_no_user_entry() {
        let dir = TempDir::new().unwrap();
        let store = unwritable_store(&dir).await;

        assert!(store.save_sleep_log(&sleep_log("u1")).await.is_err());

        let index = store.index.read().await;
        assert!(!index.sleep_logs.contains_key("u1"));
        assert!(!dir.path().join("sleep_logs.json.tmp").exists());
    }

    #[tokio::test]
    async fn failed_first_goal_write_leaves_no_user_entry() {
        let dir = TempDir::new().unwrap();
        let store = unwritable_store(&dir).await;

        assert!(store.save_goal(&goal("u1")).await.is_err());

        let index = store.index.read().await;
        assert!(!index.goals.contains_key("u1"));
        drop(index);
        assert!(store.current_goal("u1").await.unwrap().is_none());
    }
}
