//! Task repository

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{error::AppResult, models::Task, services::store::TaskStore};

/// Read-only access to the tasks table
#[derive(Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for TaskRepository {
    async fn find_task(&self, task_id: i32) -> AppResult<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, language, COALESCE(test_cases, '[]'::jsonb) AS test_cases,
                   prerequisite_task_id
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(task_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }
}
