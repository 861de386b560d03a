//! Submission repository

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    error::AppResult,
    models::{NewSubmission, Submission},
    services::store::SubmissionStore,
};

/// Append-only access to code_submissions
#[derive(Clone)]
pub struct SubmissionRepository {
    pool: PgPool,
}

impl SubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for SubmissionRepository {
    async fn save_submission(&self, submission: NewSubmission) -> AppResult<Submission> {
        let saved = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO code_submissions (user_id, task_id, language, code, verdict, output, errors, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            RETURNING id, user_id, task_id, language, code, verdict, output, errors, submitted_at
            "#,
        )
        .bind(submission.user_id)
        .bind(submission.task_id)
        .bind(&submission.language)
        .bind(&submission.code)
        .bind(submission.verdict.as_str())
        .bind(&submission.results_json)
        .bind(&submission.errors)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn list_for_task(&self, user_id: i32, task_id: i32) -> AppResult<Vec<Submission>> {
        let submissions = sqlx::query_as::<_, Submission>(
            r#"
            SELECT id, user_id, task_id, language, code, verdict, output, errors, submitted_at
            FROM code_submissions
            WHERE user_id = $1 AND task_id = $2
            ORDER BY submitted_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .bind(task_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(submissions)
    }
}
