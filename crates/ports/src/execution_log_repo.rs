//! Execution log repository port.

use async_trait::async_trait;
use nebula_core::id::RunId;
use nebula_execution::ExecutionLog;

use crate::error::PortsError;

/// Persistence interface for per-node execution log rows. Logs for a run
/// are exclusively owned by it (cascade delete when the run is removed).
#[async_trait]
pub trait ExecutionLogRepo: Send + Sync {
    /// Appends a single log row. Each call is a single atomic insert; the
    /// engine writes this synchronously before publishing the corresponding
    /// broker event, never reordered.
    async fn append(&self, entry: ExecutionLog) -> Result<(), PortsError>;

    /// Lists a run's entries ordered by `timestamp`, insertion order as the
    /// stable tiebreak.
    async fn list_by_run(&self, run_id: RunId) -> Result<Vec<ExecutionLog>, PortsError>;
}
