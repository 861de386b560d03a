//! Progress response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Game, ProgressRecord, Submission};

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub success: bool,
    pub progress: ProgressRecord,
}

#[derive(Debug, Serialize)]
pub struct ProgressListResponse {
    pub success: bool,
    pub progress: Vec<ProgressRecord>,
}

/// Submission as shown to its author
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub id: i32,
    pub task_id: i32,
    pub language: String,
    pub code: String,
    pub verdict: String,
    pub output: Option<String>,
    pub errors: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        Self {
            id: submission.id,
            task_id: submission.task_id,
            language: submission.language,
            code: submission.code,
            verdict: submission.verdict,
            output: submission.output,
            errors: submission.errors,
            submitted_at: submission.submitted_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmissionsListResponse {
    pub success: bool,
    pub submissions: Vec<SubmissionResponse>,
}

#[derive(Debug, Serialize)]
pub struct GamesResponse {
    pub success: bool,
    pub games: Vec<Game>,
}
