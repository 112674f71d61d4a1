use chrono::{DateTime, Utc};
use nebula_core::id::{GraphId, RunId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ExecutionError;
use crate::status::RunStatus;
use crate::transition::validate_run_transition;

/// The persisted record of one execution of a graph against an initial
/// state. Immutable once it reaches a terminal status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub run_id: RunId,
    pub graph_id: GraphId,
    pub status: RunStatus,
    pub initial_state: Option<Value>,
    /// Updated opportunistically during execution; only required to be
    /// current as of a terminal transition.
    pub current_state: Option<Value>,
    pub final_state: Option<Value>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub total_iterations: Option<u64>,
    pub total_execution_time_ms: Option<u64>,
    pub error_message: Option<String>,
}

impl Run {
    /// Creates a new `pending` run row. Called by the coordinator before
    /// scheduling execution.
    #[must_use]
    pub fn new(run_id: RunId, graph_id: GraphId, initial_state: Option<Value>) -> Self {
        Self {
            run_id,
            graph_id,
            status: RunStatus::Pending,
            initial_state,
            current_state: None,
            final_state: None,
            started_at: None,
            completed_at: None,
            total_iterations: None,
            total_execution_time_ms: None,
            error_message: None,
        }
    }

    /// Transitions `pending -> running` and stamps `started_at`.
    pub fn start(&mut self) -> Result<(), ExecutionError> {
        validate_run_transition(self.status, RunStatus::Running)?;
        self.status = RunStatus::Running;
        self.started_at = Some(Utc::now());
        Ok(())
    }

    /// Updates `current_state` without touching status. Safe to call
    /// repeatedly while `Running`; a no-op is not enforced on terminal runs
    /// since callers are not expected to call this after completion.
    pub fn update_current_state(&mut self, state: Value) {
        self.current_state = Some(state);
    }

    /// Transitions `running -> completed`, writing `final_state` and the
    /// accumulated totals.
    pub fn complete(
        &mut self,
        final_state: Value,
        total_iterations: u64,
        total_execution_time_ms: u64,
    ) -> Result<(), ExecutionError> {
        validate_run_transition(self.status, RunStatus::Completed)?;
        self.status = RunStatus::Completed;
        self.final_state = Some(final_state);
        self.total_iterations = Some(total_iterations);
        self.total_execution_time_ms = Some(total_execution_time_ms);
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    /// Transitions `running -> failed`, recording the last observed state
    /// and an error message. Used for node-execution failures, edge
    /// condition failures, max-iterations, and timeout.
    pub fn fail(
        &mut self,
        final_state: Value,
        error_message: impl Into<String>,
        total_iterations: u64,
        total_execution_time_ms: u64,
    ) -> Result<(), ExecutionError> {
        validate_run_transition(self.status, RunStatus::Failed)?;
        self.status = RunStatus::Failed;
        self.final_state = Some(final_state);
        self.error_message = Some(error_message.into());
        self.total_iterations = Some(total_iterations);
        self.total_execution_time_ms = Some(total_execution_time_ms);
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    /// Transitions to `cancelled`, preserving the last observed state as
    /// `final_state` with `error_message = "cancelled"`.
    pub fn cancel(
        &mut self,
        final_state: Value,
        total_iterations: u64,
        total_execution_time_ms: u64,
    ) -> Result<(), ExecutionError> {
        validate_run_transition(self.status, RunStatus::Cancelled)?;
        self.status = RunStatus::Cancelled;
        self.final_state = Some(final_state);
        self.error_message = Some("cancelled".to_string());
        self.total_iterations = Some(total_iterations);
        self.total_execution_time_ms = Some(total_execution_time_ms);
        self.completed_at = Some(Utc::now());
        Ok(())
    }
}
