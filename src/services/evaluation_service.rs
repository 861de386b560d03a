//! Test-case evaluation
//!
//! Runs a submission against every test case of a task, scores it, logs
//! the submission and, when every case passes, records the completion and
//! unlocks linked games.

use std::sync::Arc;

use futures::{stream, StreamExt};
use serde::Serialize;
use tracing::{error, info};

use super::{
    progress_service::ProgressService,
    store::{Completion, SubmissionStore, TaskStore},
};
use crate::{
    constants::scoring::{FULL_XP, MAX_SCORE, PARTIAL_XP},
    error::{AppError, AppResult},
    execution::{normalize, ExecutionRequest, Executor, ExecutorError, Language},
    models::{Game, NewSubmission, TestCase, Verdict},
};

/// Outcome of one test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCaseResult {
    pub input: String,
    pub expected_output: String,
    pub actual_output: String,
    pub errors: String,
    pub passed: bool,
    pub is_hidden: bool,
    pub timed_out: bool,
}

impl TestCaseResult {
    /// Copy safe to show the submitter later. Hidden cases keep only their outcome.
    pub fn redacted(&self) -> Self {
        if !self.is_hidden {
            return self.clone();
        }

        Self {
            input: String::new(),
            expected_output: String::new(),
            actual_output: String::new(),
            errors: String::new(),
            ..*self
        }
    }
}

/// Score and XP for a pass count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub score: i32,
    pub xp: i32,
    pub all_passed: bool,
}

impl Score {
    /// `score = round(100 * passed / total)`; full XP when everything
    /// passed, otherwise `round(50 * passed / total)`. Rounds half up.
    pub fn from_counts(passed: usize, total: usize) -> Self {
        if total == 0 {
            return Self {
                score: 0,
                xp: 0,
                all_passed: false,
            };
        }

        let all_passed = passed == total;
        let xp = if all_passed {
            FULL_XP
        } else {
            round_ratio(PARTIAL_XP, passed, total)
        };

        Self {
            score: round_ratio(MAX_SCORE, passed, total),
            xp,
            all_passed,
        }
    }
}

/// `round(scale * num / den)` with halves rounded up, in integer arithmetic
fn round_ratio(scale: i32, num: usize, den: usize) -> i32 {
    let scaled = scale as i64 * num as i64;
    let den = den as i64;
    ((2 * scaled + den) / (2 * den)) as i32
}

/// Everything an evaluation produced
#[derive(Debug, Clone)]
pub struct EvaluationResult {
    pub verdict: Verdict,
    /// Every test case in task order, hidden ones included
    pub results: Vec<TestCaseResult>,
    pub score: i32,
    pub xp: i32,
    pub all_passed: bool,
    pub unlocked_games: Vec<Game>,
}

impl EvaluationResult {
    /// Results that may be shown to the submitter
    pub fn visible_results(&self) -> impl Iterator<Item = &TestCaseResult> {
        self.results.iter().filter(|result| !result.is_hidden)
    }
}

/// Evaluates submissions against task test cases
pub struct EvaluationService {
    executor: Arc<Executor>,
    tasks: Arc<dyn TaskStore>,
    submissions: Arc<dyn SubmissionStore>,
    progress: ProgressService,
    max_parallel_tests: usize,
}

impl EvaluationService {
    pub fn new(
        executor: Arc<Executor>,
        tasks: Arc<dyn TaskStore>,
        submissions: Arc<dyn SubmissionStore>,
        progress: ProgressService,
        max_parallel_tests: usize,
    ) -> Self {
        Self {
            executor,
            tasks,
            submissions,
            progress,
            max_parallel_tests: max_parallel_tests.max(1),
        }
    }

    /// Evaluate `code` against the test cases of `task_id`.
    ///
    /// Fails with `NotFound` or `LanguageMismatch` before anything runs.
    pub async fn evaluate(
        &self,
        user_id: i32,
        task_id: i32,
        code: &str,
        language: Language,
    ) -> AppResult<EvaluationResult> {
        let task = self
            .tasks
            .find_task(task_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Task {task_id} not found")))?;

        if task.language != language.as_str() {
            return Err(AppError::LanguageMismatch {
                expected: task.language,
                actual: language.to_string(),
            });
        }

        let results = self.run_test_cases(code, language, task.test_cases()).await;
        let passed = results.iter().filter(|result| result.passed).count();
        let Score {
            score,
            xp,
            all_passed,
        } = Score::from_counts(passed, results.len());
        let verdict = Verdict::from_all_passed(all_passed);

        info!(
            user_id,
            task_id,
            language = %language,
            passed,
            total = results.len(),
            score,
            verdict = %verdict,
            "Submission evaluated"
        );

        self.log_submission(user_id, task_id, language, code, verdict, &results)
            .await;

        let unlocked_games = if all_passed {
            self.progress
                .record_completion(Completion {
                    user_id,
                    task_id,
                    language,
                    score,
                    xp,
                })
                .await?;
            self.progress.unlock_games(user_id, task_id).await
        } else {
            Vec::new()
        };

        Ok(EvaluationResult {
            verdict,
            results,
            score,
            xp,
            all_passed,
            unlocked_games,
        })
    }

    /// Run every case, at most `max_parallel_tests` at a time, keeping task order
    async fn run_test_cases(
        &self,
        code: &str,
        language: Language,
        cases: &[TestCase],
    ) -> Vec<TestCaseResult> {
        let runs: Vec<_> = cases
            .iter()
            .map(|case| self.run_test_case(code, language, case))
            .collect();

        stream::iter(runs)
            .buffered(self.max_parallel_tests)
            .collect()
            .await
    }

    async fn run_test_case(&self, code: &str, language: Language, case: &TestCase) -> TestCaseResult {
        let request = ExecutionRequest {
            source_code: code.to_string(),
            language,
            stdin: case.input.clone(),
        };

        let mut result = TestCaseResult {
            input: case.input.clone(),
            expected_output: case.expected_output.clone(),
            actual_output: String::new(),
            errors: String::new(),
            passed: false,
            is_hidden: case.is_hidden,
            timed_out: false,
        };

        match self.executor.run(&request, None).await {
            Ok(execution) => {
                result.passed = execution.succeeded()
                    && execution.output() == normalize::clean(&case.expected_output);
                result.actual_output = execution.output().to_string();
                result.errors = execution.errors().to_string();
            }
            Err(e @ ExecutorError::Timeout { .. }) => {
                result.timed_out = true;
                result.errors = format!("Execution error: {e}");
            }
            Err(ExecutorError::Infrastructure(_)) => {
                result.errors = "Execution error: execution environment unavailable".to_string();
            }
        }

        result
    }

    async fn log_submission(
        &self,
        user_id: i32,
        task_id: i32,
        language: Language,
        code: &str,
        verdict: Verdict,
        results: &[TestCaseResult],
    ) {
        let stored: Vec<TestCaseResult> = results.iter().map(TestCaseResult::redacted).collect();
        let results_json = match serde_json::to_string(&stored) {
            Ok(json) => json,
            Err(e) => {
                error!(user_id, task_id, error = %e, "Failed to serialize test results");
                "[]".to_string()
            }
        };

        let submission = NewSubmission {
            user_id,
            task_id,
            language: language.to_string(),
            code: code.to_string(),
            verdict,
            results_json,
            errors: String::new(),
        };

        if let Err(e) = self.submissions.save_submission(submission).await {
            error!(user_id, task_id, error = %e, "Failed to save submission");
        }
    }
}
