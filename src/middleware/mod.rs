//! HTTP middleware
//!
//! Authentication and rate limiting run as route layers on the protected
//! routes; access logging wraps the whole router.

pub mod auth;
pub mod logging;
pub mod rate_limit;

pub use auth::{auth_middleware, AuthenticatedUser};
pub use logging::logging_middleware;
pub use rate_limit::rate_limit_middleware;
