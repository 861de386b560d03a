//! Submission model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Submission log entry
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: i32,
    pub user_id: i32,
    pub task_id: i32,
    pub language: String,
    pub code: String,
    pub verdict: String,
    /// Serialized per-test results
    pub output: Option<String>,
    pub errors: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Submission about to be appended to the log
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub user_id: i32,
    pub task_id: i32,
    pub language: String,
    pub code: String,
    pub verdict: Verdict,
    pub results_json: String,
    pub errors: String,
}

/// Overall outcome of an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    /// Get verdict as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
        }
    }

    pub fn from_all_passed(all_passed: bool) -> Self {
        if all_passed { Self::Pass } else { Self::Fail }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
