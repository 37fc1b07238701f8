//! Mounted at `/sleep` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sleep;
use crate::state::AppState;

/// Sleep log routes.
///
/// ```text
/// POST   /                  -> create_sleep_log
/// GET    /                  -> list_sleep_logs
/// GET    /stats             -> get_sleep_stats
/// GET    /recommendations   -> get_recommendations
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(sleep::create_sleep_log).get(sleep::list_sleep_logs))
        .route("/stats", get(sleep::get_sleep_stats))
        .route("/recommendations", get(sleep::get_recommendations))
}
