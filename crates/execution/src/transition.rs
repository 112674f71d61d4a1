//! State machine transition validation for run status.

use crate::error::ExecutionError;
use crate::status::RunStatus;

/// Returns `true` if the run-level transition from `from` to `to` is valid.
///
/// `pending -> running -> exactly one of {completed, failed, cancelled}`,
/// with no transition out of a terminal status.
#[must_use]
pub fn can_transition_run(from: RunStatus, to: RunStatus) -> bool {
    matches!(
        (from, to),
        (RunStatus::Pending, RunStatus::Running)
            | (RunStatus::Pending, RunStatus::Cancelled)
            | (RunStatus::Running, RunStatus::Completed)
            | (RunStatus::Running, RunStatus::Failed)
            | (RunStatus::Running, RunStatus::Cancelled)
    )
}

/// Validates a run-level transition, returning an error if invalid.
pub fn validate_run_transition(from: RunStatus, to: RunStatus) -> Result<(), ExecutionError> {
    if can_transition_run(from, to) {
        Ok(())
    } else {
        Err(ExecutionError::invalid_transition(from, to))
    }
}
