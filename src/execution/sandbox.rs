//! Execution environment lifecycle
//!
//! A [`Sandbox`] owns one container from creation to removal:
//!
//! ```text
//! Created -> Started -> Exited | Killed -> Removed
//! ```
//!
//! [`Sandbox::remove`] consumes the handle. A handle dropped before that
//! (for example when the request future is cancelled) schedules a forced
//! removal on the runtime, so a created container is always removed.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{
    container::{ContainerError, ContainerHost, ContainerSpec, LogStream},
    normalize,
};

/// Lifecycle state of a sandbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SandboxState {
    Created,
    Started,
    Exited,
    Killed,
    Removed,
}

/// Handle to a live execution environment
pub struct Sandbox {
    host: Arc<dyn ContainerHost>,
    id: String,
    state: SandboxState,
}

impl Sandbox {
    /// Create the container described by `spec`
    pub async fn create(
        host: Arc<dyn ContainerHost>,
        spec: &ContainerSpec,
    ) -> Result<Self, ContainerError> {
        let id = host.create(spec).await?;
        debug!(container_id = %id, image = %spec.image, name = %spec.name, "Sandbox created");

        Ok(Self {
            host,
            id,
            state: SandboxState::Created,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> SandboxState {
        self.state
    }

    pub async fn start(&mut self) -> Result<(), ContainerError> {
        self.host.start(&self.id).await?;
        self.state = SandboxState::Started;
        debug!(container_id = %self.id, "Sandbox started");
        Ok(())
    }

    /// Wait for the guest to exit and return its exit code
    pub async fn wait(&mut self) -> Result<i64, ContainerError> {
        let exit_code = self.host.wait(&self.id).await?;
        self.state = SandboxState::Exited;
        debug!(container_id = %self.id, exit_code, "Sandbox exited");
        Ok(exit_code)
    }

    /// Kill the guest. Failure is logged; removal still follows.
    pub async fn kill(&mut self) {
        if let Err(e) = self.host.kill(&self.id).await {
            warn!(container_id = %self.id, error = %e, "Failed to kill sandbox");
        }
        self.state = SandboxState::Killed;
    }

    /// Cleaned contents of one output stream, empty if it cannot be read
    pub async fn output(&self, stream: LogStream) -> String {
        match self.host.logs(&self.id, stream).await {
            Ok(bytes) => normalize::clean_bytes(&bytes),
            Err(e) => {
                warn!(container_id = %self.id, stream = ?stream, error = %e, "Failed to read sandbox output");
                String::new()
            }
        }
    }

    /// Force-remove the container. Failure is logged, never returned.
    pub async fn remove(mut self) {
        if let Err(e) = self.host.remove(&self.id).await {
            warn!(container_id = %self.id, error = %e, "Failed to remove sandbox");
        } else {
            debug!(container_id = %self.id, "Sandbox removed");
        }
        self.state = SandboxState::Removed;
    }
}

impl Drop for Sandbox {
    fn drop(&mut self) {
        if self.state == SandboxState::Removed {
            return;
        }

        warn!(container_id = %self.id, state = ?self.state, "Sandbox dropped before removal");

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let host = Arc::clone(&self.host);
        let id = std::mem::take(&mut self.id);
        runtime.spawn(async move {
            if let Err(e) = host.remove(&id).await {
                warn!(container_id = %id, error = %e, "Deferred sandbox removal failed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::container::MockContainerHost;
    use crate::test_utils::sample_spec;
    use mockall::{predicate::eq, Sequence};

    #[tokio::test]
    async fn test_lifecycle_calls_host_in_order() {
        let mut host = MockContainerHost::new();
        let mut seq = Sequence::new();

        host.expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok("c1".to_string()));
        host.expect_start()
            .with(eq("c1"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        host.expect_wait()
            .with(eq("c1"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(3));
        host.expect_remove()
            .with(eq("c1"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let mut sandbox = Sandbox::create(Arc::new(host), &sample_spec()).await.unwrap();
        assert_eq!(sandbox.state(), SandboxState::Created);

        sandbox.start().await.unwrap();
        assert_eq!(sandbox.state(), SandboxState::Started);

        assert_eq!(sandbox.wait().await.unwrap(), 3);
        assert_eq!(sandbox.state(), SandboxState::Exited);

        sandbox.remove().await;
    }

    #[tokio::test]
    async fn test_failed_log_read_degrades_to_empty() {
        let mut host = MockContainerHost::new();
        host.expect_create().returning(|_| Ok("c2".to_string()));
        host.expect_logs()
            .returning(|_, _| Err(ContainerError::Api("log driver".to_string())));
        host.expect_remove().times(1).returning(|_| Ok(()));

        let sandbox = Sandbox::create(Arc::new(host), &sample_spec()).await.unwrap();
        assert_eq!(sandbox.output(LogStream::Stderr).await, "");
        sandbox.remove().await;
    }

    #[tokio::test]
    async fn test_remove_failure_is_swallowed() {
        let mut host = MockContainerHost::new();
        host.expect_create().returning(|_| Ok("c3".to_string()));
        host.expect_kill()
            .returning(|_| Err(ContainerError::Unavailable("socket closed".to_string())));
        host.expect_remove()
            .times(1)
            .returning(|_| Err(ContainerError::Unavailable("socket closed".to_string())));

        let mut sandbox = Sandbox::create(Arc::new(host), &sample_spec()).await.unwrap();
        sandbox.kill().await;
        assert_eq!(sandbox.state(), SandboxState::Killed);
        sandbox.remove().await;
    }
}
