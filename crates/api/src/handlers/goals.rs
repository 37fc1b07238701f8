//! Handlers for sleep goals and goal progress.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use sleeptrack_core::goal::{evaluate_goal_progress, require_goal};
use sleeptrack_db::models::goal::CreateGoal;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /goals
// ---------------------------------------------------------------------------

/// Set the caller's goal. The newest goal is the one progress is measured
/// against.
pub async fn create_goal(
    auth: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<CreateGoal>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    input.validate()?;

    let goal = input.into_goal(&auth.user_id, Utc::now());
    state.goals.save_goal(&goal).await?;

    tracing::info!(
        goal_id = %goal.id,
        user_id = %auth.user_id,
        goal_type = %goal.goal_type,
        "Goal set",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: goal })))
}

// ---------------------------------------------------------------------------
// GET /goals/progress
// ---------------------------------------------------------------------------

/// Day-by-day compliance with the caller's current goal over the last
/// seven days. Returns 404 when no goal has been set.
pub async fn get_goal_progress(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let goal = require_goal(&auth.user_id, state.goals.current_goal(&auth.user_id).await?)?;
    let logs = state.sleep_logs.list_sleep_logs(&auth.user_id).await?;

    let report = evaluate_goal_progress(&goal, &logs, Utc::now());

    tracing::debug!(
        user_id = %auth.user_id,
        goal_type = %goal.goal_type,
        met_days = report.met_days,
        total_days = report.total_days,
        "Goal progress evaluated",
    );

    Ok(Json(DataResponse { data: report }))
}
