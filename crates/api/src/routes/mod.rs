pub mod goals;
pub mod health;
pub mod sleep;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /sleep                         record, list (auth required)
/// /sleep/stats                   7-day quality summary
/// /sleep/recommendations         sleep-hygiene advice
///
/// /goals                         set goal (auth required)
/// /goals/progress                progress against current goal
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/sleep", sleep::router())
        .nest("/goals", goals::router())
}
