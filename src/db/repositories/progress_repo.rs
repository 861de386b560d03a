//! Progress repository

use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};

use super::GameRepository;
use crate::{
    constants::progress::{INITIAL_LEVEL, STATUS_COMPLETED},
    error::AppResult,
    execution::Language,
    models::{Game, ProgressRecord, TaskCompletionRecord},
    services::{
        progress_service::CompletionDelta,
        store::{Completion, ProgressStore},
    },
};

/// Access to user_progress, user_task_progress and game unlocks
#[derive(Clone)]
pub struct ProgressRepository {
    pool: PgPool,
}

impl ProgressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ensure_record<'e>(
        executor: impl PgExecutor<'e>,
        user_id: i32,
        language: &str,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_progress (user_id, language, total_score, total_xp,
                                       completed_tasks_count, current_level, created_at, updated_at)
            VALUES ($1, $2, 0, 0, 0, $3, NOW(), NOW())
            ON CONFLICT (user_id, language) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(language)
        .bind(INITIAL_LEVEL)
        .execute(executor)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl ProgressStore for ProgressRepository {
    async fn record_completion(&self, completion: Completion) -> AppResult<ProgressRecord> {
        let language = completion.language.as_str();
        let mut tx = self.pool.begin().await?;

        Self::ensure_record(&mut *tx, completion.user_id, language).await?;

        // Row lock on the (user, language) record serializes concurrent completions
        sqlx::query("SELECT 1 FROM user_progress WHERE user_id = $1 AND language = $2 FOR UPDATE")
            .bind(completion.user_id)
            .bind(language)
            .execute(&mut *tx)
            .await?;

        let previous = sqlx::query_as::<_, TaskCompletionRecord>(
            r#"
            SELECT user_id, task_id, status, COALESCE(score, 0) AS score,
                   COALESCE(xp_earned, 0) AS xp_earned, completed_at
            FROM user_task_progress
            WHERE user_id = $1 AND task_id = $2
            "#,
        )
        .bind(completion.user_id)
        .bind(completion.task_id)
        .fetch_optional(&mut *tx)
        .await?;

        let delta = CompletionDelta::compute(previous.as_ref(), completion.score, completion.xp);

        sqlx::query(
            r#"
            INSERT INTO user_task_progress (user_id, task_id, language, status, score, xp_earned, completed_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            ON CONFLICT (user_id, task_id) DO UPDATE SET
                status = EXCLUDED.status,
                score = GREATEST(COALESCE(user_task_progress.score, 0), EXCLUDED.score),
                xp_earned = GREATEST(COALESCE(user_task_progress.xp_earned, 0), EXCLUDED.xp_earned),
                completed_at = COALESCE(user_task_progress.completed_at, EXCLUDED.completed_at)
            "#,
        )
        .bind(completion.user_id)
        .bind(completion.task_id)
        .bind(language)
        .bind(STATUS_COMPLETED)
        .bind(completion.score)
        .bind(completion.xp)
        .execute(&mut *tx)
        .await?;

        let record = sqlx::query_as::<_, ProgressRecord>(
            r#"
            UPDATE user_progress SET
                total_score = total_score + $3,
                total_xp = total_xp + $4,
                completed_tasks_count = completed_tasks_count + $5,
                updated_at = NOW()
            WHERE user_id = $1 AND language = $2
            RETURNING user_id, language, total_score, total_xp, completed_tasks_count,
                      current_level, updated_at
            "#,
        )
        .bind(completion.user_id)
        .bind(language)
        .bind(delta.score)
        .bind(delta.xp)
        .bind(delta.completed_tasks)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(record)
    }

    async fn unlock_games_for_task(&self, user_id: i32, task_id: i32) -> AppResult<Vec<Game>> {
        GameRepository::unlock_for_task(&self.pool, user_id, task_id).await
    }

    async fn get_or_create(&self, user_id: i32, language: Language) -> AppResult<ProgressRecord> {
        Self::ensure_record(&self.pool, user_id, language.as_str()).await?;

        let record = sqlx::query_as::<_, ProgressRecord>(
            r#"
            SELECT user_id, language, total_score, total_xp, completed_tasks_count,
                   current_level, updated_at
            FROM user_progress
            WHERE user_id = $1 AND language = $2
            "#,
        )
        .bind(user_id)
        .bind(language.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<ProgressRecord>> {
        let records = sqlx::query_as::<_, ProgressRecord>(
            r#"
            SELECT user_id, language, total_score, total_xp, completed_tasks_count,
                   current_level, updated_at
            FROM user_progress
            WHERE user_id = $1
            ORDER BY language
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn list_unlocked_games(&self, user_id: i32) -> AppResult<Vec<Game>> {
        GameRepository::list_unlocked(&self.pool, user_id).await
    }
}
