//! Progress ledger against a real PostgreSQL.
//!
//! Run with `TEST_DATABASE_URL=postgres://... cargo test -- --ignored`.

use kodesk::{
    db::{self, repositories::ProgressRepository},
    execution::Language,
    services::store::{Completion, ProgressStore},
};
use sqlx::PgPool;

async fn pool() -> PgPool {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    let pool = PgPool::connect(&url).await.unwrap();
    db::run_migrations(&pool).await.unwrap();
    pool
}

/// A user id no other run has touched
fn fresh_user() -> i32 {
    (chrono::Utc::now().timestamp_micros() % i32::MAX as i64) as i32
}

async fn insert_task(pool: &PgPool) -> i32 {
    sqlx::query_scalar(
        "INSERT INTO tasks (title, language, test_cases) VALUES ('Ledger', 'python', '[]') RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn insert_game(pool: &PgPool, task_id: i32) -> i32 {
    let game_id: i32 =
        sqlx::query_scalar("INSERT INTO games (title, level_number) VALUES ('Ledger Game', 1) RETURNING id")
            .fetch_one(pool)
            .await
            .unwrap();
    sqlx::query("INSERT INTO game_tasks (game_id, task_id) VALUES ($1, $2)")
        .bind(game_id)
        .bind(task_id)
        .execute(pool)
        .await
        .unwrap();
    game_id
}

fn completion(user_id: i32, task_id: i32, score: i32, xp: i32) -> Completion {
    Completion {
        user_id,
        task_id,
        language: Language::Python,
        score,
        xp,
    }
}

#[tokio::test]
#[ignore]
async fn test_repeat_completion_does_not_double_count() {
    let pool = pool().await;
    let repo = ProgressRepository::new(pool.clone());
    let user_id = fresh_user();
    let task_id = insert_task(&pool).await;

    let first = repo.record_completion(completion(user_id, task_id, 100, 100)).await.unwrap();
    assert_eq!(first.completed_tasks_count, 1);
    assert_eq!(first.total_xp, 100);

    let second = repo.record_completion(completion(user_id, task_id, 100, 100)).await.unwrap();
    assert_eq!(second.completed_tasks_count, 1);
    assert_eq!(second.total_score, 100);
    assert_eq!(second.total_xp, 100);
}

#[tokio::test]
#[ignore]
async fn test_concurrent_completions_count_once() {
    let pool = pool().await;
    let repo = ProgressRepository::new(pool.clone());
    let user_id = fresh_user();
    let task_id = insert_task(&pool).await;

    let runs = (0..8).map(|_| {
        let repo = repo.clone();
        tokio::spawn(async move { repo.record_completion(completion(user_id, task_id, 100, 100)).await })
    });
    for run in futures::future::join_all(runs).await {
        run.unwrap().unwrap();
    }

    let record = repo.get_or_create(user_id, Language::Python).await.unwrap();
    assert_eq!(record.completed_tasks_count, 1);
    assert_eq!(record.total_xp, 100);
}

#[tokio::test]
#[ignore]
async fn test_unlock_reports_new_games_once() {
    let pool = pool().await;
    let repo = ProgressRepository::new(pool.clone());
    let user_id = fresh_user();
    let task_id = insert_task(&pool).await;
    let game_id = insert_game(&pool, task_id).await;

    let first = repo.unlock_games_for_task(user_id, task_id).await.unwrap();
    assert_eq!(first.iter().map(|game| game.id).collect::<Vec<_>>(), [game_id]);

    let second = repo.unlock_games_for_task(user_id, task_id).await.unwrap();
    assert!(second.is_empty());

    let unlocked = repo.list_unlocked_games(user_id).await.unwrap();
    assert_eq!(unlocked.len(), 1);
}
