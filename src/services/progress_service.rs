//! Progress bookkeeping

use std::sync::Arc;

use tracing::{info, warn};

use super::store::{Completion, ProgressStore};
use crate::{
    constants::progress::STATUS_COMPLETED,
    error::AppResult,
    execution::Language,
    models::{Game, ProgressRecord, TaskCompletionRecord},
};

/// Amount a completion adds to a user's running totals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionDelta {
    pub score: i32,
    pub xp: i32,
    pub completed_tasks: i32,
}

impl CompletionDelta {
    /// Delta for a completion with `score`/`xp`, given the user's previous record for the task.
    ///
    /// A first completion counts in full. A repeated completion only adds
    /// the improvement over the previous best, never a negative amount.
    pub fn compute(previous: Option<&TaskCompletionRecord>, score: i32, xp: i32) -> Self {
        match previous.filter(|record| record.status == STATUS_COMPLETED) {
            None => Self {
                score,
                xp,
                completed_tasks: 1,
            },
            Some(record) => Self {
                score: (score - record.score).max(0),
                xp: (xp - record.xp_earned).max(0),
                completed_tasks: 0,
            },
        }
    }

    /// In-memory counterpart of the repository's UPDATE
    #[cfg(test)]
    pub(crate) fn apply_to(&self, record: &mut ProgressRecord) {
        record.total_score += self.score;
        record.total_xp += self.xp;
        record.completed_tasks_count += self.completed_tasks;
    }
}

/// Front for the progress store used by the evaluator and handlers
#[derive(Clone)]
pub struct ProgressService {
    store: Arc<dyn ProgressStore>,
}

impl ProgressService {
    pub fn new(store: Arc<dyn ProgressStore>) -> Self {
        Self { store }
    }

    pub async fn record_completion(&self, completion: Completion) -> AppResult<ProgressRecord> {
        let record = self.store.record_completion(completion).await?;
        info!(
            user_id = completion.user_id,
            task_id = completion.task_id,
            language = %completion.language,
            total_score = record.total_score,
            total_xp = record.total_xp,
            completed = record.completed_tasks_count,
            "Completion recorded"
        );
        Ok(record)
    }

    /// Unlock games for a completed task. Failures are logged and yield no games.
    pub async fn unlock_games(&self, user_id: i32, task_id: i32) -> Vec<Game> {
        match self.store.unlock_games_for_task(user_id, task_id).await {
            Ok(games) => {
                if !games.is_empty() {
                    info!(user_id, task_id, count = games.len(), "Games unlocked");
                }
                games
            }
            Err(e) => {
                warn!(user_id, task_id, error = %e, "Failed to unlock games");
                Vec::new()
            }
        }
    }

    pub async fn get_or_create(&self, user_id: i32, language: Language) -> AppResult<ProgressRecord> {
        self.store.get_or_create(user_id, language).await
    }

    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<ProgressRecord>> {
        self.store.list_for_user(user_id).await
    }

    pub async fn unlocked_games(&self, user_id: i32) -> AppResult<Vec<Game>> {
        self.store.list_unlocked_games(user_id).await
    }
}
