//! Error type for repository port operations.

use thiserror::Error;

/// Every repository method returns `Result<_, PortsError>`. Backend drivers
/// map their internal errors into these variants so the coordinator can make
/// retry decisions without knowing the concrete backend.
#[derive(Debug, Error)]
pub enum PortsError {
    /// Entity not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Optimistic concurrency conflict on a `Run` update.
    #[error("{entity} {id}: expected version {expected_version}, got {actual_version}")]
    Conflict {
        entity: String,
        id: String,
        expected_version: u64,
        actual_version: u64,
    },

    /// Backend connection failure.
    #[error("connection error: {0}")]
    Connection(String),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Operation exceeded its timeout.
    #[error("timeout: {0}")]
    Timeout(String),

    /// A `Run` write attempted a lifecycle transition
    /// [`nebula_execution::can_transition_run`] rejects — most commonly a
    /// write against an already-terminal run. Distinct from `Conflict`,
    /// which models optimistic-concurrency version mismatches rather than
    /// the run-status state machine.
    #[error("invalid run transition: {0}")]
    InvalidTransition(String),

    /// Catch-all internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PortsError {
    #[must_use]
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    #[must_use]
    pub fn conflict(entity: impl Into<String>, id: impl Into<String>, expected: u64, actual: u64) -> Self {
        Self::Conflict {
            entity: entity.into(),
            id: id.into(),
            expected_version: expected,
            actual_version: actual,
        }
    }

    /// Returns `true` for transient failures the caller may retry with
    /// bounded backoff; `false` for permanent ones.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout(_))
    }
}

impl From<serde_json::Error> for PortsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<nebula_execution::ExecutionError> for PortsError {
    fn from(err: nebula_execution::ExecutionError) -> Self {
        Self::InvalidTransition(err.to_string())
    }
}
