//! KODESK - Code Execution Service
//!
//! Runs untrusted C++, Java and Python submissions in throwaway Docker
//! containers, grades them against task test cases and keeps each user's
//! progress ledger.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Evaluation and progress logic
//! - **Execution**: Sandboxed container runs
//! - **Repositories**: Database access
//! - **Models**: Domain models

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod execution;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
