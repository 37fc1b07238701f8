//! Mounted at `/goals` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::goals;
use crate::state::AppState;

/// Goal routes.
///
/// ```text
/// POST   /                  -> create_goal
/// GET    /progress          -> get_goal_progress
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(goals::create_goal))
        .route("/progress", get(goals::get_goal_progress))
}
