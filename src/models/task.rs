//! Task model

use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};

/// A programming task as seen by the evaluator
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub language: String,
    pub test_cases: Json<Vec<TestCase>>,
    pub prerequisite_task_id: Option<i32>,
}

/// One input/expected-output pair of a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(default)]
    pub input: String,
    pub expected_output: String,
    #[serde(default)]
    pub is_hidden: bool,
}

impl Task {
    pub fn test_cases(&self) -> &[TestCase] {
        &self.test_cases.0
    }
}
