//! Execution handler implementations

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    execution::{ExecutionRequest, Language},
    handlers::extract::JsonBody,
    middleware::auth::AuthenticatedUser,
    state::AppState,
};

use super::{
    request::{EvaluateRequest, RunCodeRequest},
    response::{EvaluateResponse, LanguageResponse, LanguagesResponse, RunCodeResponse},
};

/// Run code once and return what it printed
pub async fn run_code(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    JsonBody(payload): JsonBody<RunCodeRequest>,
) -> AppResult<Json<RunCodeResponse>> {
    payload.validate()?;
    let language: Language = payload.language.parse()?;

    tracing::debug!(user_id = auth_user.id, language = %language, "Running code");

    let request = ExecutionRequest {
        source_code: payload.code,
        language,
        stdin: payload.input,
    };
    let result = state.executor().run(&request, None).await?;

    Ok(Json(result.into()))
}

/// Evaluate code against every test case of a task
pub async fn evaluate_code(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    JsonBody(payload): JsonBody<EvaluateRequest>,
) -> AppResult<Json<EvaluateResponse>> {
    payload.validate()?;
    let language: Language = payload.language.parse()?;

    let evaluation = state
        .evaluator()
        .evaluate(auth_user.id, payload.task_id, &payload.code, language)
        .await?;

    Ok(Json(evaluation.into()))
}

/// List supported languages with their effective timeouts
pub async fn list_languages(State(state): State<AppState>) -> Json<LanguagesResponse> {
    let languages = Language::ALL
        .into_iter()
        .map(|language| {
            let timeout_ms = state.executor().timeout_for(language).as_millis() as u64;
            LanguageResponse::new(language.profile(), timeout_ms)
        })
        .collect();

    Json(LanguagesResponse {
        success: true,
        languages,
    })
}
