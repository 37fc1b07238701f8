//! Handlers for recording and summarizing sleep sessions.
//!
//! Every endpoint requires authentication and only ever touches the
//! caller's own logs.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use sleeptrack_core::recommendation::DEFAULT_RECOMMENDATION;
use sleeptrack_core::sleep::compute_sleep_stats;
use sleeptrack_db::models::sleep_log::CreateSleepLog;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /sleep
// ---------------------------------------------------------------------------

/// Record a sleep session for the caller.
pub async fn create_sleep_log(
    auth: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<CreateSleepLog>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    input.validate()?;

    let log = input.into_sleep_log(&auth.user_id, Utc::now());
    state.sleep_logs.save_sleep_log(&log).await?;

    tracing::info!(
        sleep_log_id = %log.id,
        user_id = %auth.user_id,
        quality = log.quality,
        "Sleep log recorded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: log })))
}

// ---------------------------------------------------------------------------
// GET /sleep
// ---------------------------------------------------------------------------

/// List the caller's sleep logs, newest first.
pub async fn list_sleep_logs(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let logs = state.sleep_logs.list_sleep_logs(&auth.user_id).await?;
    Ok(Json(DataResponse { data: logs }))
}

// ---------------------------------------------------------------------------
// GET /sleep/stats
// ---------------------------------------------------------------------------

/// Average quality and quality trend over the last seven days.
pub async fn get_sleep_stats(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let logs = state.sleep_logs.list_sleep_logs(&auth.user_id).await?;
    let stats = compute_sleep_stats(&logs, Utc::now());
    Ok(Json(DataResponse { data: stats }))
}

// ---------------------------------------------------------------------------
// GET /sleep/recommendations
// ---------------------------------------------------------------------------

pub async fn get_recommendations(_auth: AuthUser) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: DEFAULT_RECOMMENDATION,
    }))
}
