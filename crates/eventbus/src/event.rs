//! Wire-agnostic event schema published per run.
//!
//! These are projections, not the source of truth — the canonical replay
//! source is the `ExecutionLog` table via the repository, per §4.7.

use chrono::{DateTime, Utc};
use nebula_core::id::RunId;
use nebula_core::name::NodeName;
use nebula_execution::{NodeExecutionStatus, RunStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Event {
    StatusUpdate {
        run_id: RunId,
        status: RunStatus,
        current_node: Option<NodeName>,
    },
    NodeCompleted {
        run_id: RunId,
        node_name: NodeName,
        duration_ms: u64,
        iteration: u64,
        node_status: NodeExecutionStatus,
    },
    WorkflowCompleted {
        run_id: RunId,
        status: RunStatus,
        final_state: Option<Value>,
        total_duration_ms: u64,
        total_iterations: u64,
        error_message: Option<String>,
    },
    ProgressUpdate {
        run_id: RunId,
        current_node: NodeName,
        completed_nodes: u64,
        total_nodes: u64,
        progress_percentage: f64,
    },
    LogEntry {
        run_id: RunId,
        node_name: NodeName,
        status: NodeExecutionStatus,
        timestamp: DateTime<Utc>,
        error: Option<String>,
    },
    Error {
        run_id: RunId,
        message: String,
        node: Option<NodeName>,
    },
    /// Heartbeat reply; carries no run identity.
    Pong { timestamp: DateTime<Utc> },
}

impl Event {
    /// `true` for the one event type that ends a run's stream.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::WorkflowCompleted { .. })
    }
}
