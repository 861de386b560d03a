//! Progress models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Cumulative progress of one user in one language
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub user_id: i32,
    pub language: String,
    pub total_score: i32,
    pub total_xp: i32,
    pub completed_tasks_count: i32,
    pub current_level: i32,
    pub updated_at: DateTime<Utc>,
}

/// Best result of one user on one task
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct TaskCompletionRecord {
    pub user_id: i32,
    pub task_id: i32,
    pub status: String,
    pub score: i32,
    pub xp_earned: i32,
    pub completed_at: Option<DateTime<Utc>>,
}
