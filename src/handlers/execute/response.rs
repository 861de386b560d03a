//! Execution response DTOs

use serde::Serialize;

use crate::{
    execution::{ExecutionResult, LanguageProfile},
    models::{Game, Verdict},
    services::evaluation_service::{EvaluationResult, TestCaseResult},
};

/// Output of a single run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunCodeResponse {
    pub success: bool,
    pub output: String,
    pub errors: String,
    pub exit_code: i64,
}

impl From<ExecutionResult> for RunCodeResponse {
    fn from(result: ExecutionResult) -> Self {
        Self {
            success: true,
            output: result.output().to_string(),
            errors: result.errors().to_string(),
            exit_code: result.exit_code,
        }
    }
}

/// Outcome of an evaluation. Hidden test cases are never included.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateResponse {
    pub success: bool,
    pub verdict: Verdict,
    pub results: Vec<TestCaseResult>,
    pub score: i32,
    pub xp: i32,
    pub all_passed: bool,
    pub unlocked_games: Vec<Game>,
    pub message: String,
}

impl From<EvaluationResult> for EvaluateResponse {
    fn from(evaluation: EvaluationResult) -> Self {
        let message = if evaluation.all_passed {
            "All test cases passed!"
        } else {
            "Some test cases failed. Try again!"
        };

        Self {
            success: true,
            verdict: evaluation.verdict,
            results: evaluation.visible_results().cloned().collect(),
            score: evaluation.score,
            xp: evaluation.xp,
            all_passed: evaluation.all_passed,
            unlocked_games: evaluation.unlocked_games,
            message: message.to_string(),
        }
    }
}

/// One supported language
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageResponse {
    pub id: &'static str,
    pub name: &'static str,
    pub image: &'static str,
    pub timeout_ms: u64,
}

impl LanguageResponse {
    pub fn new(profile: &'static LanguageProfile, timeout_ms: u64) -> Self {
        Self {
            id: profile.language.as_str(),
            name: profile.language.display_name(),
            image: profile.image,
            timeout_ms,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub success: bool,
    pub languages: Vec<LanguageResponse>,
}
