//! Liveness endpoint

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::{execution::Language, state::AppState};

/// Liveness report. Does not touch Docker or the database.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
    pub languages: Vec<&'static str>,
}

impl HealthResponse {
    fn ok() -> Self {
        Self {
            status: "OK",
            message: "KODESK API is running",
            version: env!("CARGO_PKG_VERSION"),
            languages: Language::ALL.iter().map(Language::as_str).collect(),
        }
    }
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
