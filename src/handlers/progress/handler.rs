//! Progress handler implementations

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    execution::Language,
    handlers::extract::PathParam,
    middleware::auth::AuthenticatedUser,
    state::AppState,
};

use super::response::{
    GamesResponse, ProgressListResponse, ProgressResponse, SubmissionsListResponse,
};

/// Progress in every language the user has touched
pub async fn list_progress(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<ProgressListResponse>> {
    let progress = state.progress().list_for_user(auth_user.id).await?;

    Ok(Json(ProgressListResponse {
        success: true,
        progress,
    }))
}

/// Progress in one language, created empty on first access
pub async fn get_language_progress(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    PathParam(language): PathParam<String>,
) -> AppResult<Json<ProgressResponse>> {
    let language: Language = language.parse()?;
    let progress = state.progress().get_or_create(auth_user.id, language).await?;

    Ok(Json(ProgressResponse {
        success: true,
        progress,
    }))
}

/// Submission history for one task, newest first
pub async fn list_task_submissions(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    PathParam(task_id): PathParam<i32>,
) -> AppResult<Json<SubmissionsListResponse>> {
    let submissions = state
        .submissions()
        .list_for_task(auth_user.id, task_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(SubmissionsListResponse {
        success: true,
        submissions,
    }))
}

/// Games the user has unlocked
pub async fn list_unlocked_games(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<GamesResponse>> {
    let games = state.progress().unlocked_games(auth_user.id).await?;

    Ok(Json(GamesResponse {
        success: true,
        games,
    }))
}
