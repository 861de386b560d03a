//! Storage boundaries used by the services
//!
//! PostgreSQL implementations live in `crate::db::repositories`.

use async_trait::async_trait;

use crate::{
    error::AppResult,
    execution::Language,
    models::{Game, NewSubmission, ProgressRecord, Submission, Task},
};

/// Read access to task definitions
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn find_task(&self, task_id: i32) -> AppResult<Option<Task>>;
}

/// Append-only submission log
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn save_submission(&self, submission: NewSubmission) -> AppResult<Submission>;

    /// Submissions of one user for one task, newest first
    async fn list_for_task(&self, user_id: i32, task_id: i32) -> AppResult<Vec<Submission>>;
}

/// A task fully solved by a user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub user_id: i32,
    pub task_id: i32,
    pub language: Language,
    pub score: i32,
    pub xp: i32,
}

/// Progress counters and unlocks
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Fold a completion into the user's totals atomically.
    ///
    /// Implementations apply [`CompletionDelta`](super::progress_service::CompletionDelta)
    /// against the previous best for the task.
    async fn record_completion(&self, completion: Completion) -> AppResult<ProgressRecord>;

    /// Unlock every game linked to `task_id`, returning the ones unlocked by this call
    async fn unlock_games_for_task(&self, user_id: i32, task_id: i32) -> AppResult<Vec<Game>>;

    async fn get_or_create(&self, user_id: i32, language: Language) -> AppResult<ProgressRecord>;

    async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<ProgressRecord>>;

    async fn list_unlocked_games(&self, user_id: i32) -> AppResult<Vec<Game>>;
}
