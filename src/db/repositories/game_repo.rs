//! Game repository

use sqlx::{PgExecutor, PgPool};

use crate::{error::AppResult, models::Game};

/// Repository for game unlocks
pub struct GameRepository;

impl GameRepository {
    /// Insert an unlock for every game linked to `task_id`.
    ///
    /// Existing unlocks are left alone; only games unlocked by this call are returned.
    pub async fn unlock_for_task<'e>(
        executor: impl PgExecutor<'e>,
        user_id: i32,
        task_id: i32,
    ) -> AppResult<Vec<Game>> {
        let games = sqlx::query_as::<_, Game>(
            r#"
            WITH linked AS (
                SELECT g.id, g.title, g.description, g.level_number
                FROM games g
                JOIN game_tasks gt ON gt.game_id = g.id
                WHERE gt.task_id = $2
            ),
            inserted AS (
                INSERT INTO user_game_progress (user_id, game_id, created_at)
                SELECT $1, id, NOW() FROM linked
                ON CONFLICT (user_id, game_id) DO NOTHING
                RETURNING game_id
            )
            SELECT linked.id, linked.title, linked.description, linked.level_number
            FROM linked
            JOIN inserted ON inserted.game_id = linked.id
            ORDER BY linked.level_number NULLS LAST, linked.id
            "#,
        )
        .bind(user_id)
        .bind(task_id)
        .fetch_all(executor)
        .await?;

        Ok(games)
    }

    /// Games the user has unlocked so far
    pub async fn list_unlocked(pool: &PgPool, user_id: i32) -> AppResult<Vec<Game>> {
        let games = sqlx::query_as::<_, Game>(
            r#"
            SELECT g.id, g.title, g.description, g.level_number
            FROM games g
            JOIN user_game_progress ugp ON ugp.game_id = g.id
            WHERE ugp.user_id = $1
            ORDER BY g.level_number NULLS LAST, g.id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(games)
    }
}
