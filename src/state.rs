//! Application state management
//!
//! Shared state handed to every request handler via Axum's State extractor.

use std::sync::Arc;

use redis::aio::ConnectionManager;

use crate::{
    config::Config,
    execution::Executor,
    services::{store::SubmissionStore, EvaluationService, ProgressService},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    config: Config,
    executor: Arc<Executor>,
    evaluator: EvaluationService,
    progress: ProgressService,
    submissions: Arc<dyn SubmissionStore>,
    /// Rate limiting is skipped without Redis
    redis: Option<ConnectionManager>,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        config: Config,
        executor: Arc<Executor>,
        evaluator: EvaluationService,
        progress: ProgressService,
        submissions: Arc<dyn SubmissionStore>,
        redis: Option<ConnectionManager>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                executor,
                evaluator,
                progress,
                submissions,
                redis,
            }),
        }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn executor(&self) -> &Executor {
        &self.inner.executor
    }

    pub fn evaluator(&self) -> &EvaluationService {
        &self.inner.evaluator
    }

    pub fn progress(&self) -> &ProgressService {
        &self.inner.progress
    }

    pub fn submissions(&self) -> &dyn SubmissionStore {
        self.inner.submissions.as_ref()
    }

    /// Get a clone of the Redis connection manager, if configured
    pub fn redis(&self) -> Option<ConnectionManager> {
        self.inner.redis.clone()
    }
}
