//! Database module
//!
//! Connection pool, migrations and the PostgreSQL repositories.

pub mod connection;
pub mod repositories;

use sqlx::PgPool;

pub use connection::create_pool;

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
