//! Code execution handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{middleware::rate_limit_middleware, state::AppState};

/// Execution routes that need an authenticated caller
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/execute/run", post(handler::run_code))
        .route("/execute/evaluate", post(handler::evaluate_code))
        .route_layer(middleware::from_fn_with_state(state, rate_limit_middleware))
}

/// Execution routes open to everyone
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/execute/languages", get(handler::list_languages))
}
