//! Progress handlers

mod handler;
pub mod response;

pub use handler::*;
pub use response::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Progress routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/progress", get(handler::list_progress))
        .route("/progress/games", get(handler::list_unlocked_games))
        .route("/progress/{language}", get(handler::get_language_progress))
        .route(
            "/progress/tasks/{task_id}/submissions",
            get(handler::list_task_submissions),
        )
}
