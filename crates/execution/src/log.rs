use chrono::{DateTime, Utc};
use nebula_core::id::RunId;
use nebula_core::name::NodeName;
use serde::{Deserialize, Serialize};

use crate::status::NodeExecutionStatus;

/// Per-node audit row. A run owns its log entries exclusively (cascade
/// delete); entries for a run are ordered by `timestamp`, with insertion
/// order as the stable tiebreak.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionLog {
    pub run_id: RunId,
    pub node_name: NodeName,
    pub status: NodeExecutionStatus,
    pub timestamp: DateTime<Utc>,
    pub iteration: u64,
    pub execution_time_ms: Option<u64>,
    pub error_message: Option<String>,
}

impl ExecutionLog {
    #[must_use]
    pub fn started(run_id: RunId, node_name: NodeName, iteration: u64) -> Self {
        Self {
            run_id,
            node_name,
            status: NodeExecutionStatus::Started,
            timestamp: Utc::now(),
            iteration,
            execution_time_ms: None,
            error_message: None,
        }
    }

    #[must_use]
    pub fn completed(run_id: RunId, node_name: NodeName, iteration: u64, execution_time_ms: u64) -> Self {
        Self {
            run_id,
            node_name,
            status: NodeExecutionStatus::Completed,
            timestamp: Utc::now(),
            iteration,
            execution_time_ms: Some(execution_time_ms),
            error_message: None,
        }
    }

    #[must_use]
    pub fn failed(
        run_id: RunId,
        node_name: NodeName,
        iteration: u64,
        execution_time_ms: u64,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            run_id,
            node_name,
            status: NodeExecutionStatus::Failed,
            timestamp: Utc::now(),
            iteration,
            execution_time_ms: Some(execution_time_ms),
            error_message: Some(error_message.into()),
        }
    }

    #[must_use]
    pub fn skipped(run_id: RunId, node_name: NodeName, iteration: u64) -> Self {
        Self {
            run_id,
            node_name,
            status: NodeExecutionStatus::Skipped,
            timestamp: Utc::now(),
            iteration,
            execution_time_ms: None,
            error_message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn started_entry_has_no_duration() {
        let entry = ExecutionLog::started(RunId::v4(), NodeName::new("a").unwrap(), 0);
        assert_eq!(entry.status, NodeExecutionStatus::Started);
        assert!(entry.execution_time_ms.is_none());
    }

    #[test]
    fn completed_entry_carries_duration_and_no_error() {
        let entry = ExecutionLog::completed(RunId::v4(), NodeName::new("a").unwrap(), 0, 42);
        assert_eq!(entry.execution_time_ms, Some(42));
        assert!(entry.error_message.is_none());
    }

    #[test]
    fn failed_entry_carries_error_message() {
        let entry = ExecutionLog::failed(RunId::v4(), NodeName::new("b").unwrap(), 1, 7, "boom");
        assert_eq!(entry.status, NodeExecutionStatus::Failed);
        assert_eq!(entry.error_message.as_deref(), Some("boom"));
    }

    #[test]
    fn log_round_trips_through_json() {
        let entry = ExecutionLog::completed(RunId::v4(), NodeName::new("a").unwrap(), 3, 10);
        let json = serde_json::to_string(&entry).unwrap();
        let back: ExecutionLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back.iteration, entry.iteration);
        assert_eq!(back.node_name, entry.node_name);
    }
}
