//! Sandboxed executor
//!
//! Runs one submission inside a fresh, resource-bounded container and
//! reports what the guest program did. Guest failures (non-zero exit) are
//! ordinary results; only timeouts and container host failures are errors.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::{
    container::{ContainerHost, ContainerSpec, LogStream, ResourceLimits},
    languages::Language,
    sandbox::Sandbox,
    ExecutionRequest, ExecutionResult, ExecutorError,
};
use crate::{
    config::SandboxConfig,
    constants::{SANDBOX_LABEL, SANDBOX_NAME_PREFIX},
};

/// Runs code in disposable containers
pub struct Executor {
    host: Arc<dyn ContainerHost>,
    limits: ResourceLimits,
    timeouts: HashMap<Language, Duration>,
}

impl Executor {
    pub fn new(host: Arc<dyn ContainerHost>, config: &SandboxConfig) -> Self {
        let timeouts = Language::ALL
            .into_iter()
            .map(|language| (language, Duration::from_millis(config.timeout_ms_for(language))))
            .collect();

        Self {
            host,
            limits: config.limits(),
            timeouts,
        }
    }

    /// Wall-clock budget for a language
    pub fn timeout_for(&self, language: Language) -> Duration {
        self.timeouts
            .get(&language)
            .copied()
            .unwrap_or_else(|| Duration::from_millis(language.profile().timeout_ms))
    }

    /// Run `request` to completion or until the deadline passes.
    ///
    /// The container is removed on every path out of this function.
    pub async fn run(
        &self,
        request: &ExecutionRequest,
        timeout_override: Option<Duration>,
    ) -> Result<ExecutionResult, ExecutorError> {
        let spec = self.container_spec(request);
        let timeout = timeout_override.unwrap_or_else(|| self.timeout_for(request.language));
        let started = Instant::now();

        let mut sandbox = Sandbox::create(Arc::clone(&self.host), &spec)
            .await
            .inspect_err(|e| {
                error!(language = %request.language, image = %spec.image, error = %e, "Failed to create sandbox")
            })?;

        let outcome = Self::drive(&mut sandbox, timeout).await;
        let container_id = sandbox.id().to_string();
        sandbox.remove().await;

        let duration_ms = started.elapsed().as_millis() as u64;
        match &outcome {
            Ok(result) => info!(
                language = %request.language,
                container_id = %container_id,
                exit_code = result.exit_code,
                duration_ms,
                "Execution finished"
            ),
            Err(ExecutorError::Timeout { timeout_ms }) => warn!(
                language = %request.language,
                container_id = %container_id,
                timeout_ms,
                "Execution timed out"
            ),
            Err(e) => error!(
                language = %request.language,
                container_id = %container_id,
                error = %e,
                "Execution failed"
            ),
        }

        outcome
    }

    async fn drive(sandbox: &mut Sandbox, timeout: Duration) -> Result<ExecutionResult, ExecutorError> {
        sandbox.start().await?;

        let waited = tokio::select! {
            exited = sandbox.wait() => Some(exited),
            _ = tokio::time::sleep(timeout) => None,
        };

        let exit_code = match waited {
            Some(exited) => exited?,
            None => {
                sandbox.kill().await;
                return Err(ExecutorError::Timeout {
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
        };

        let (stdout, stderr) = tokio::join!(
            sandbox.output(LogStream::Stdout),
            sandbox.output(LogStream::Stderr)
        );

        Ok(ExecutionResult {
            stdout,
            stderr,
            exit_code,
        })
    }

    fn container_spec(&self, request: &ExecutionRequest) -> ContainerSpec {
        let profile = request.language.profile();
        let command = profile.command(&request.source_code, &request.stdin);

        let labels = HashMap::from([
            (SANDBOX_LABEL.to_string(), "true".to_string()),
            (format!("{SANDBOX_LABEL}.language"), request.language.to_string()),
        ]);

        ContainerSpec {
            name: format!("{}-{}", SANDBOX_NAME_PREFIX, Uuid::new_v4()),
            image: profile.image.to_string(),
            command: vec!["/bin/sh".to_string(), "-c".to_string(), command],
            labels,
            limits: self.limits,
        }
    }

    /// Images of supported languages that are not present on the host
    pub async fn missing_images(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        for language in Language::ALL {
            let image = language.profile().image;
            match self.host.has_image(image).await {
                Ok(true) => debug!(image, "Sandbox image present"),
                Ok(false) => missing.push(image),
                Err(e) => {
                    warn!(image, error = %e, "Could not inspect sandbox image");
                    missing.push(image);
                }
            }
        }
        missing
    }
}
