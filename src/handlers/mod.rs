//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod execute;
pub mod extract;
pub mod health;
pub mod progress;

use axum::{middleware, Router};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .merge(execute::routes(state.clone()))
        .merge(progress::routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .merge(health::routes())
        .merge(execute::public_routes())
        .merge(protected)
}
