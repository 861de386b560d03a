//! Untrusted code execution
//!
//! - [`languages`]: per-language images and command construction
//! - [`normalize`]: canonical form for output comparison
//! - [`container`]: container host primitives and the Docker implementation
//! - [`sandbox`]: lifecycle of one execution environment
//! - [`executor`]: runs a request with limits and a deadline

pub mod container;
pub mod executor;
pub mod languages;
pub mod normalize;
pub mod sandbox;
pub mod shell;

pub use container::{ContainerError, ContainerHost, DockerHost};
pub use executor::Executor;
pub use languages::{Language, LanguageProfile, UnsupportedLanguage};

/// One program to run
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    pub source_code: String,
    pub language: Language,
    /// Fed to the program when non-empty
    pub stdin: String,
}

/// What the guest program did. Both streams are already cleaned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i64,
}

impl ExecutionResult {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }

    /// Program output shown to the user
    pub fn output(&self) -> &str {
        &self.stdout
    }

    /// Diagnostics shown to the user.
    ///
    /// Falls back to stdout when a failing program wrote nothing to stderr.
    pub fn errors(&self) -> &str {
        if self.succeeded() || !self.stderr.is_empty() {
            &self.stderr
        } else {
            &self.stdout
        }
    }
}

/// Execution failures that are not the guest program's own exit status
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutorError {
    #[error("Execution timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    #[error(transparent)]
    Infrastructure(#[from] ContainerError),
}
