//! Access logging middleware

use axum::{
    body::Body,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Log every request with its status and duration.
///
/// Health probes are logged at debug level.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis() as u64;

    match response.status() {
        s if s.is_server_error() => {
            warn!(%method, %path, status, duration_ms, "Request failed")
        }
        s if s.is_client_error() && s != StatusCode::NOT_FOUND => {
            warn!(%method, %path, status, duration_ms, "Request rejected")
        }
        _ if path.ends_with("/health") => {
            debug!(%method, %path, status, duration_ms, "Health check")
        }
        _ => info!(%method, %path, status, duration_ms, "Request completed"),
    }

    response
}
