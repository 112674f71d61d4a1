//! Run repository port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nebula_core::id::{GraphId, RunId};
use nebula_execution::{ExecutionLog, Run, RunStatus};
use serde_json::Value;

use crate::error::PortsError;

/// A `Run` row plus its `ExecutionLog` rows, as returned by a single
/// eager-loading read — the shape the state-query HTTP endpoint (out of
/// scope here) would serve directly.
#[derive(Debug, Clone)]
pub struct RunDetail {
    pub run: Run,
    pub logs: Vec<ExecutionLog>,
}

/// Persistence interface for run records.
#[async_trait]
pub trait RunRepo: Send + Sync {
    /// Persists a new `pending` run row for `graph_id` against
    /// `initial_state`, returning it with its allocated `run_id`.
    async fn create(&self, graph_id: GraphId, initial_state: Option<Value>) -> Result<Run, PortsError>;

    /// Fetches a run together with its ordered execution log.
    async fn get_by_run_id(&self, run_id: RunId) -> Result<Option<RunDetail>, PortsError>;

    async fn list(
        &self,
        graph_id: Option<GraphId>,
        status: Option<RunStatus>,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Run>, PortsError>;

    /// Transitions `run_id`'s status, stamping whichever of `started_at` /
    /// `completed_at` is supplied.
    ///
    /// Implementations MUST validate the transition against
    /// [`nebula_execution::can_transition_run`] (`pending -> running ->
    /// exactly one of {completed, failed, cancelled}`, no transition out of
    /// a terminal status) and fail with [`PortsError::InvalidTransition`]
    /// rather than silently applying a disallowed one — this is the only
    /// reachable write path for a run's status, so the terminal-immutability
    /// invariant spec.md §3 requires has nowhere else to be enforced.
    async fn update_status(
        &self,
        run_id: RunId,
        status: RunStatus,
        started_at: Option<DateTime<Utc>>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<(), PortsError>;

    /// Writes `current_state` without touching status — the opportunistic
    /// progress-polling update.
    async fn update_current_state(&self, run_id: RunId, current_state: Value) -> Result<(), PortsError>;

    /// Writes the terminal `final_state`, totals, and optional
    /// `error_message` on a run's terminal transition.
    async fn update_final_state(
        &self,
        run_id: RunId,
        final_state: Value,
        total_iterations: u64,
        total_execution_time_ms: u64,
        error_message: Option<String>,
    ) -> Result<(), PortsError>;
}
