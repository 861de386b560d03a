//! Game model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Auxiliary content unlocked by completing a task
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Game {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub level_number: Option<i32>,
}
