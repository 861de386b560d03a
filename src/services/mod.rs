//! Business logic services

pub mod auth_service;
pub mod evaluation_service;
pub mod progress_service;
pub mod store;

pub use auth_service::AuthService;
pub use evaluation_service::EvaluationService;
pub use progress_service::ProgressService;
