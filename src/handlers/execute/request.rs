//! Execution request DTOs

use serde::Deserialize;
use validator::Validate;

/// Run code once against optional input
#[derive(Debug, Deserialize, Validate)]
pub struct RunCodeRequest {
    #[validate(length(min = 1, max = 65536))]
    pub code: String,

    #[validate(length(min = 1, max = 20))]
    pub language: String,

    /// Fed to the program's stdin
    #[serde(default)]
    #[validate(length(max = 65536))]
    pub input: String,
}

/// Evaluate code against a task's test cases
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    #[validate(range(min = 1))]
    pub task_id: i32,

    #[validate(length(min = 1, max = 65536))]
    pub code: String,

    #[validate(length(min = 1, max = 20))]
    pub language: String,
}
