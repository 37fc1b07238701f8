//! Integration tests for the JSON-file storage backend.

use assert_matches::assert_matches;
use chrono::{Duration, TimeZone, Utc};
use sleeptrack_core::goal::Goal;
use sleeptrack_core::sleep::SleepLog;
use sleeptrack_core::types::Timestamp;
use sleeptrack_db::file_store::FileStore;
use sleeptrack_db::repositories::{GoalRepository, SleepLogRepository};
use sleeptrack_db::StorageError;
use tempfile::TempDir;
use uuid::Uuid;

fn base() -> Timestamp {
    Utc.with_ymd_and_hms(2026, 4, 1, 22, 0, 0).unwrap()
}

fn sleep_log(user_id: &str, days: i64, quality: i32) -> SleepLog {
    let start = base() + Duration::days(days);
    SleepLog {
        id: Uuid::new_v4(),
        user_id: user_id.into(),
        start_time: start,
        end_time: start + Duration::hours(8),
        quality,
        reason: None,
        interruptions: Vec::new(),
        created_at: start,
    }
}

fn goal(user_id: &str, goal_type: &str, value: &str, minutes: i64) -> Goal {
    Goal {
        id: Uuid::new_v4(),
        user_id: user_id.into(),
        goal_type: goal_type.into(),
        value: value.into(),
        created_at: base() + Duration::minutes(minutes),
    }
}

async fn open_in(dir: &TempDir) -> FileStore {
    FileStore::open(
        dir.path().join("data/sleep_logs.json"),
        dir.path().join("data/goals.json"),
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Test: opening with no files yields an empty store
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_files_open_empty() {
    let dir = TempDir::new().unwrap();
    let store = open_in(&dir).await;

    assert!(store.list_sleep_logs("u1").await.unwrap().is_empty());
    assert!(store.current_goal("u1").await.unwrap().is_none());
    assert!(dir.path().join("data").is_dir());
}

// ---------------------------------------------------------------------------
// Test: an empty file is treated like a missing one
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_files_open_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("sleep.json"), "").unwrap();
    std::fs::write(dir.path().join("goals.json"), "  \n").unwrap();

    let store = FileStore::open(dir.path().join("sleep.json"), dir.path().join("goals.json"))
        .await
        .unwrap();

    assert!(store.list_sleep_logs("u1").await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Test: malformed JSON is reported, not ignored
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("sleep.json"), "{not json").unwrap();

    let result =
        FileStore::open(dir.path().join("sleep.json"), dir.path().join("goals.json")).await;

    assert_matches!(result, Err(StorageError::Json { .. }));
}

// ---------------------------------------------------------------------------
// Test: logs come back newest first regardless of insert order
// ---------------------------------------------------------------------------

#[tokio::test]
async fn logs_are_listed_newest_first() {
    let dir = TempDir::new().unwrap();
    let store = open_in(&dir).await;

    for days in [2, 5, 1, 4, 3] {
        store.save_sleep_log(&sleep_log("u1", days, 5)).await.unwrap();
    }
    store.save_sleep_log(&sleep_log("u2", 9, 5)).await.unwrap();

    let logs = store.list_sleep_logs("u1").await.unwrap();
    assert_eq!(logs.len(), 5);
    assert!(logs.windows(2).all(|w| w[0].start_time >= w[1].start_time));
    assert_eq!(logs[0].start_time, base() + Duration::days(5));
}

// ---------------------------------------------------------------------------
// Test: data survives reopening, and is re-sorted on load
// ---------------------------------------------------------------------------

#[tokio::test]
async fn data_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let store = open_in(&dir).await;
        store.save_sleep_log(&sleep_log("u1", 1, 7)).await.unwrap();
        store.save_sleep_log(&sleep_log("u1", 3, 9)).await.unwrap();
        store
            .save_goal(&goal("u1", "duration", "7h", 0))
            .await
            .unwrap();
    }

    let store = open_in(&dir).await;
    let logs = store.list_sleep_logs("u1").await.unwrap();
    assert_eq!(logs.iter().map(|l| l.quality).collect::<Vec<_>>(), vec![9, 7]);

    let current = store.current_goal("u1").await.unwrap().unwrap();
    assert_eq!(current.value, "7h");
    assert!(!dir.path().join("data/goals.json.tmp").exists());
}

// ---------------------------------------------------------------------------
// Test: the newest goal across types is the current one
// ---------------------------------------------------------------------------

#[tokio::test]
async fn current_goal_is_most_recent_across_types() {
    let dir = TempDir::new().unwrap();
    let store = open_in(&dir).await;

    store.save_goal(&goal("u1", "duration", "7h", 0)).await.unwrap();
    store.save_goal(&goal("u1", "quality", "> 6", 10)).await.unwrap();
    store.save_goal(&goal("u1", "consistency", "before 23", 5)).await.unwrap();

    let current = store.current_goal("u1").await.unwrap().unwrap();
    assert_eq!(current.goal_type, "quality");
    assert!(store.current_goal("u2").await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Test: goals created at the same instant resolve by id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn current_goal_tie_resolves_by_id() {
    let dir = TempDir::new().unwrap();
    let store = open_in(&dir).await;

    let mut quality = goal("u1", "quality", "> 6", 0);
    quality.id = Uuid::from_u128(1);
    let mut duration = goal("u1", "duration", "7h", 0);
    duration.id = Uuid::from_u128(2);

    store.save_goal(&quality).await.unwrap();
    store.save_goal(&duration).await.unwrap();
    assert_eq!(store.current_goal("u1").await.unwrap().unwrap().id, duration.id);

    drop(store);
    let reopened = open_in(&dir).await;
    assert_eq!(reopened.current_goal("u1").await.unwrap().unwrap().id, duration.id);
}

// ---------------------------------------------------------------------------
// Test: setting a goal of an existing type replaces it
// ---------------------------------------------------------------------------

#[tokio::test]
async fn same_type_goal_replaces_previous() {
    let dir = TempDir::new().unwrap();
    let store = open_in(&dir).await;

    store.save_goal(&goal("u1", "duration", "7h", 0)).await.unwrap();
    store.save_goal(&goal("u1", "duration", "8h", 1)).await.unwrap();

    let raw = std::fs::read_to_string(store.goals_file()).unwrap();
    let on_disk: Vec<Goal> = serde_json::from_str(&raw).unwrap();
    assert_eq!(on_disk.len(), 1);
    assert_eq!(on_disk[0].value, "8h");
}

// ---------------------------------------------------------------------------
// Test: a file with duplicate goal types keeps the newest on load
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_keeps_newest_duplicate_goal() {
    let dir = TempDir::new().unwrap();
    let goals = vec![
        goal("u1", "duration", "9h", 30),
        goal("u1", "duration", "6h", 0),
    ];
    std::fs::write(
        dir.path().join("goals.json"),
        serde_json::to_string(&goals).unwrap(),
    )
    .unwrap();

    let store = FileStore::open(dir.path().join("sleep.json"), dir.path().join("goals.json"))
        .await
        .unwrap();

    assert_eq!(store.current_goal("u1").await.unwrap().unwrap().value, "9h");
}

// ---------------------------------------------------------------------------
// Test: the sleep log file is a plain JSON array of logs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sleep_file_is_json_array() {
    let dir = TempDir::new().unwrap();
    let store = open_in(&dir).await;
    let mut log = sleep_log("u1", 0, 8);
    log.reason = Some("late coffee".into());
    log.interruptions = vec!["noise".into()];
    store.save_sleep_log(&log).await.unwrap();

    let raw = std::fs::read_to_string(store.sleep_file()).unwrap();
    let on_disk: Vec<SleepLog> = serde_json::from_str(&raw).unwrap();
    assert_eq!(on_disk, vec![log]);
}
