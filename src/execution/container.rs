//! Container host abstraction
//!
//! [`ContainerHost`] exposes the primitives the executor needs from a
//! container runtime. [`DockerHost`] implements them over the Docker API.

use std::collections::HashMap;

use async_trait::async_trait;
use bollard::{
    container::LogOutput,
    models::{ContainerCreateBody, HostConfig},
    query_parameters::{
        CreateContainerOptionsBuilder, KillContainerOptions, LogsOptions,
        RemoveContainerOptionsBuilder, StartContainerOptions, WaitContainerOptions,
    },
    Docker,
};
use futures::StreamExt;

/// Everything needed to create one execution environment
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub command: Vec<String>,
    pub labels: HashMap<String, String>,
    pub limits: ResourceLimits,
}

/// Resource bounds applied to every environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceLimits {
    pub memory_bytes: i64,
    pub cpu_period: i64,
    pub cpu_quota: i64,
    pub pids_limit: i64,
    pub network_disabled: bool,
}

/// Output stream selector for log retrieval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStream {
    Stdout,
    Stderr,
}

/// Container host failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContainerError {
    #[error("Container host unavailable: {0}")]
    Unavailable(String),

    #[error("Image not found: {0}")]
    ImageNotFound(String),

    #[error("Container host busy: {0}")]
    Busy(String),

    #[error("Container host error: {0}")]
    Api(String),
}

impl ContainerError {
    /// Whether the caller may retry the same request later
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Busy(_))
    }
}

impl From<bollard::errors::Error> for ContainerError {
    fn from(err: bollard::errors::Error) -> Self {
        match err {
            bollard::errors::Error::DockerResponseServerError {
                status_code,
                message,
            } => match status_code {
                404 => ContainerError::ImageNotFound(message),
                409 | 429 | 503 => ContainerError::Busy(message),
                _ => ContainerError::Api(format!("{status_code}: {message}")),
            },
            other => ContainerError::Unavailable(other.to_string()),
        }
    }
}

/// Primitive operations on a container runtime
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContainerHost: Send + Sync {
    /// Create a stopped container, returning its id
    async fn create(&self, spec: &ContainerSpec) -> Result<String, ContainerError>;

    async fn start(&self, id: &str) -> Result<(), ContainerError>;

    /// Block until the container exits, returning its exit code
    async fn wait(&self, id: &str) -> Result<i64, ContainerError>;

    async fn kill(&self, id: &str) -> Result<(), ContainerError>;

    /// Force-remove the container whatever its state
    async fn remove(&self, id: &str) -> Result<(), ContainerError>;

    /// Full contents of one output stream
    async fn logs(&self, id: &str, stream: LogStream) -> Result<Vec<u8>, ContainerError>;

    /// Whether `image` is present locally
    async fn has_image(&self, image: &str) -> Result<bool, ContainerError>;
}

/// Docker Engine implementation of [`ContainerHost`]
#[derive(Clone)]
pub struct DockerHost {
    docker: Docker,
}

impl DockerHost {
    pub fn new(docker: Docker) -> Self {
        Self { docker }
    }

    /// Connect to the daemon socket at `socket_path`
    pub fn connect(socket_path: &str, timeout_secs: u64) -> Result<Self, ContainerError> {
        let docker =
            Docker::connect_with_socket(socket_path, timeout_secs, bollard::API_DEFAULT_VERSION)?;
        Ok(Self::new(docker))
    }

    /// Daemon version string, used as a startup connectivity check
    pub async fn version(&self) -> Result<String, ContainerError> {
        let version = self.docker.version().await?;
        Ok(version.version.unwrap_or_default())
    }
}

#[async_trait]
impl ContainerHost for DockerHost {
    async fn create(&self, spec: &ContainerSpec) -> Result<String, ContainerError> {
        let options = CreateContainerOptionsBuilder::default()
            .name(&spec.name)
            .build();

        let host_config = HostConfig {
            memory: Some(spec.limits.memory_bytes),
            memory_swap: Some(spec.limits.memory_bytes),
            cpu_period: Some(spec.limits.cpu_period),
            cpu_quota: Some(spec.limits.cpu_quota),
            pids_limit: Some(spec.limits.pids_limit),
            network_mode: spec.limits.network_disabled.then(|| "none".to_string()),
            ..Default::default()
        };

        let body = ContainerCreateBody {
            image: Some(spec.image.clone()),
            cmd: Some(spec.command.clone()),
            attach_stdout: Some(true),
            attach_stderr: Some(true),
            tty: Some(false),
            open_stdin: Some(false),
            network_disabled: Some(spec.limits.network_disabled),
            labels: Some(spec.labels.clone()),
            host_config: Some(host_config),
            ..Default::default()
        };

        let container = self.docker.create_container(Some(options), body).await?;
        Ok(container.id)
    }

    async fn start(&self, id: &str) -> Result<(), ContainerError> {
        self.docker
            .start_container(id, None::<StartContainerOptions>)
            .await?;
        Ok(())
    }

    async fn wait(&self, id: &str) -> Result<i64, ContainerError> {
        let mut stream = self.docker.wait_container(id, None::<WaitContainerOptions>);

        match stream.next().await {
            Some(Ok(response)) => Ok(response.status_code),
            // bollard reports a non-zero exit as an error carrying the code
            Some(Err(bollard::errors::Error::DockerContainerWaitError { code, .. })) => Ok(code),
            Some(Err(e)) => Err(e.into()),
            None => Err(ContainerError::Api(
                "Wait stream ended before the container exited".to_string(),
            )),
        }
    }

    async fn kill(&self, id: &str) -> Result<(), ContainerError> {
        self.docker
            .kill_container(id, None::<KillContainerOptions>)
            .await?;
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), ContainerError> {
        let options = RemoveContainerOptionsBuilder::default().force(true).build();
        self.docker.remove_container(id, Some(options)).await?;
        Ok(())
    }

    async fn logs(&self, id: &str, stream: LogStream) -> Result<Vec<u8>, ContainerError> {
        let options = LogsOptions {
            stdout: stream == LogStream::Stdout,
            stderr: stream == LogStream::Stderr,
            ..Default::default()
        };

        let mut logs = self.docker.logs(id, Some(options));
        let mut buffer = Vec::new();

        while let Some(chunk) = logs.next().await {
            match chunk? {
                LogOutput::StdOut { message } | LogOutput::StdErr { message } => {
                    buffer.extend_from_slice(&message)
                }
                _ => {}
            }
        }

        Ok(buffer)
    }

    async fn has_image(&self, image: &str) -> Result<bool, ContainerError> {
        match self.docker.inspect_image(image).await {
            Ok(_) => Ok(true),
            Err(bollard::errors::Error::DockerResponseServerError {
                status_code: 404, ..
            }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
