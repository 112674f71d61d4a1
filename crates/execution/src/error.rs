use thiserror::Error;

use crate::status::RunStatus;

/// Errors raised while advancing a [`crate::run::Run`]'s lifecycle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("invalid run transition: {from} -> {to}")]
    InvalidTransition { from: RunStatus, to: RunStatus },

    /// A write was attempted against a Run row that already reached a
    /// terminal status; terminal records are immutable.
    #[error("run is already terminal at status {0}")]
    AlreadyTerminal(RunStatus),
}

impl ExecutionError {
    #[must_use]
    pub fn invalid_transition(from: RunStatus, to: RunStatus) -> Self {
        Self::InvalidTransition { from, to }
    }
}
