//! Rate limiting middleware
//!
//! Fixed window counter in Redis, keyed by user. Runs after authentication.

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use redis::AsyncCommands;
use tracing::warn;

use super::auth::AuthenticatedUser;
use crate::{error::AppError, state::AppState};

/// Limit execution requests per user
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(mut redis) = state.redis() else {
        return Ok(next.run(request).await);
    };

    let user = request
        .extensions()
        .get::<AuthenticatedUser>()
        .map_or_else(|| "anonymous".to_string(), |user| user.id.to_string());
    let limits = &state.config().rate_limit;
    let key = format!("rate_limit:execute:{user}");

    // Fail open: an unreachable Redis must not take execution down with it
    let count: i64 = match redis.incr(&key, 1).await {
        Ok(count) => count,
        Err(e) => {
            warn!(error = %e, "Rate limit check failed");
            return Ok(next.run(request).await);
        }
    };

    if count == 1 {
        let _: () = redis.expire(&key, limits.window_secs).await.unwrap_or(());
    }

    if count > limits.max_requests {
        warn!(user = %user, count, "Execution rate limit exceeded");
        return Err(AppError::TooManyRequests);
    }

    Ok(next.run(request).await)
}
