use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nebula_core::id::{GraphId, RunId};
use nebula_execution::{ExecutionLog, Run, RunStatus, validate_run_transition};
use nebula_ports::{PortsError, RunDetail, RunRepo};
use parking_lot::Mutex;
use serde_json::Value;

use crate::execution_log_repo::MemoryExecutionLogRepo;

/// In-memory [`RunRepo`]. Guarded by a single mutex — adequate for tests and
/// local experimentation, not a durable store.
///
/// Shares its log storage with a [`MemoryExecutionLogRepo`] so that
/// `get_by_run_id`'s eager-load sees the same rows the engine appended
/// through the log repo port.
pub struct MemoryRunRepo {
    rows: Mutex<HashMap<RunId, Run>>,
    logs: MemoryExecutionLogRepo,
}

impl MemoryRunRepo {
    #[must_use]
    pub fn new(logs: MemoryExecutionLogRepo) -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
            logs,
        }
    }
}

#[async_trait]
impl RunRepo for MemoryRunRepo {
    async fn create(&self, graph_id: GraphId, initial_state: Option<Value>) -> Result<Run, PortsError> {
        let run_id = RunId::v4();
        let run = Run::new(run_id, graph_id, initial_state);
        self.rows.lock().insert(run_id, run.clone());
        Ok(run)
    }

    async fn get_by_run_id(&self, run_id: RunId) -> Result<Option<RunDetail>, PortsError> {
        let Some(run) = self.rows.lock().get(&run_id).cloned() else {
            return Ok(None);
        };
        let logs = self.logs.list_by_run(run_id).await?;
        Ok(Some(RunDetail { run, logs }))
    }

    async fn list(
        &self,
        graph_id: Option<GraphId>,
        status: Option<RunStatus>,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Run>, PortsError> {
        let mut rows: Vec<Run> = self
            .rows
            .lock()
            .values()
            .filter(|run| graph_id.is_none_or(|id| run.graph_id == id))
            .filter(|run| status.is_none_or(|s| run.status == s))
            .cloned()
            .collect();
        rows.sort_by_key(|run| run.run_id.to_string());
        Ok(rows.into_iter().skip(skip).take(limit).collect())
    }

    async fn update_status(
        &self,
        run_id: RunId,
        status: RunStatus,
        started_at: Option<DateTime<Utc>>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<(), PortsError> {
        let mut rows = self.rows.lock();
        let run = rows
            .get_mut(&run_id)
            .ok_or_else(|| PortsError::not_found("Run", run_id.to_string()))?;
        validate_run_transition(run.status, status)?;
        run.status = status;
        if let Some(started_at) = started_at {
            run.started_at = Some(started_at);
        }
        if let Some(completed_at) = completed_at {
            run.completed_at = Some(completed_at);
        }
        Ok(())
    }

    async fn update_current_state(&self, run_id: RunId, current_state: Value) -> Result<(), PortsError> {
        let mut rows = self.rows.lock();
        let run = rows
            .get_mut(&run_id)
            .ok_or_else(|| PortsError::not_found("Run", run_id.to_string()))?;
        run.update_current_state(current_state);
        Ok(())
    }

    async fn update_final_state(
        &self,
        run_id: RunId,
        final_state: Value,
        total_iterations: u64,
        total_execution_time_ms: u64,
        error_message: Option<String>,
    ) -> Result<(), PortsError> {
        let mut rows = self.rows.lock();
        let run = rows
            .get_mut(&run_id)
            .ok_or_else(|| PortsError::not_found("Run", run_id.to_string()))?;
        run.final_state = Some(final_state);
        run.total_iterations = Some(total_iterations);
        run.total_execution_time_ms = Some(total_execution_time_ms);
        run.error_message = error_message;
        run.completed_at.get_or_insert_with(Utc::now);
        Ok(())
    }
}
