use std::collections::HashMap;

use async_trait::async_trait;
use nebula_core::id::RunId;
use nebula_execution::ExecutionLog;
use nebula_ports::{ExecutionLogRepo, PortsError};
use parking_lot::Mutex;

/// In-memory [`ExecutionLogRepo`]. Rows are kept in append order per run,
/// which already satisfies "ordered by timestamp, insertion order as
/// tiebreak" since wall-clock timestamps from a single process never go
/// backwards between two appends to the same run.
#[derive(Default, Clone)]
pub struct MemoryExecutionLogRepo {
    rows: std::sync::Arc<Mutex<HashMap<RunId, Vec<ExecutionLog>>>>,
}

impl MemoryExecutionLogRepo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExecutionLogRepo for MemoryExecutionLogRepo {
    async fn append(&self, entry: ExecutionLog) -> Result<(), PortsError> {
        self.rows.lock().entry(entry.run_id).or_default().push(entry);
        Ok(())
    }

    async fn list_by_run(&self, run_id: RunId) -> Result<Vec<ExecutionLog>, PortsError> {
        Ok(self.rows.lock().get(&run_id).cloned().unwrap_or_default())
    }
}
