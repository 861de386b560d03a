//! Application-wide constants
//!
//! Defaults for configuration values and the fixed sandbox parameters.
//! Constants are grouped by their purpose.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 5000;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

/// Seconds an evaluation waits for a pooled connection before failing
pub const DATABASE_ACQUIRE_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// DOCKER DEFAULTS
// =============================================================================

/// Default Docker daemon socket
pub const DEFAULT_DOCKER_SOCKET_PATH: &str = "/var/run/docker.sock";

/// Timeout for a single Docker API call, in seconds
pub const DEFAULT_DOCKER_API_TIMEOUT_SECS: u64 = 120;

// =============================================================================
// SANDBOX LIMITS
// =============================================================================

/// Memory cap per execution environment
pub const DEFAULT_SANDBOX_MEMORY_LIMIT_MB: i64 = 128;

/// CFS scheduler period in microseconds
pub const DEFAULT_SANDBOX_CPU_PERIOD: i64 = 100_000;

/// CFS quota in microseconds (half of one core with the default period)
pub const DEFAULT_SANDBOX_CPU_QUOTA: i64 = 50_000;

/// Maximum processes/threads inside one environment
pub const DEFAULT_SANDBOX_PIDS_LIMIT: i64 = 50;

/// Wall-clock deadline for one run, in milliseconds
pub const DEFAULT_SANDBOX_TIMEOUT_MS: u64 = 5_000;

/// Test cases of one evaluation run one after another unless raised
pub const DEFAULT_MAX_PARALLEL_TESTS: usize = 1;

/// Container name prefix
pub const SANDBOX_NAME_PREFIX: &str = "kodesk";

/// Label attached to every sandbox container
pub const SANDBOX_LABEL: &str = "kodesk.sandbox";

// =============================================================================
// SUBMISSION LIMITS
// =============================================================================

/// Largest request body accepted by the API
pub const MAX_REQUEST_BODY_BYTES: usize = 256 * 1024;

// =============================================================================
// SCORING
// =============================================================================

pub mod scoring {
    /// Score awarded when every test case passes
    pub const MAX_SCORE: i32 = 100;

    /// XP awarded when every test case passes
    pub const FULL_XP: i32 = 100;

    /// XP scale applied to the pass ratio on partial success
    pub const PARTIAL_XP: i32 = 50;
}

// =============================================================================
// PROGRESS
// =============================================================================

pub mod progress {
    /// Level assigned to a freshly created progress record
    pub const INITIAL_LEVEL: i32 = 1;

    /// Task status stored once every test case has passed
    pub const STATUS_COMPLETED: &str = "completed";
}

// =============================================================================
// RATE LIMITING
// =============================================================================

pub mod rate_limits {
    /// Execute/evaluate requests allowed per window
    pub const EXECUTE_MAX_REQUESTS: i64 = 30;

    /// Window size in seconds
    pub const EXECUTE_WINDOW_SECS: i64 = 60;
}
