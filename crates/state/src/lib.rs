//! The value that flows node-to-node during a run.
//!
//! `WorkflowState` is conceptually immutable: every node produces a new
//! logical state rather than mutating the one it was given. In practice the
//! engine clones-on-write (`with_iteration`, `with_data`, …) the way the
//! teacher's `ExecutionState` advances its own version counter on each
//! transition rather than mutating in place.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use nebula_core::id::{RunId, WorkflowId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The value carried between nodes for the lifetime of a single run.
///
/// `data`, `errors`, `warnings`, and `config` are the only open/heterogeneous
/// fields; everything else is strongly typed. Round-trips losslessly through
/// `serde_json` (`decode(encode(s)) == s`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowState {
    pub workflow_id: WorkflowId,
    pub run_id: RunId,
    pub timestamp: DateTime<Utc>,
    /// Engine-maintained traversal counter; increments once per executed node.
    pub iteration: u64,
    pub data: Map<String, Value>,
    pub errors: VecDeque<String>,
    pub warnings: VecDeque<String>,
    pub config: Map<String, Value>,
}

impl WorkflowState {
    /// Builds the initial state for a new run. `iteration` starts at zero.
    #[must_use]
    pub fn new(workflow_id: WorkflowId, run_id: RunId, data: Map<String, Value>) -> Self {
        Self {
            workflow_id,
            run_id,
            timestamp: Utc::now(),
            iteration: 0,
            data,
            errors: VecDeque::new(),
            warnings: VecDeque::new(),
            config: Map::new(),
        }
    }

    /// Attaches execution hints supplied at run start.
    #[must_use]
    pub fn with_config(mut self, config: Map<String, Value>) -> Self {
        self.config = config;
        self
    }

    /// Returns a copy with the iteration counter set, as the engine does once
    /// per executed node.
    #[must_use]
    pub fn with_iteration(mut self, iteration: u64) -> Self {
        self.iteration = iteration;
        self
    }

    /// Returns a copy with `message` appended to the error list, as the Node
    /// wrapper does when a tool's invocation fails.
    #[must_use]
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.errors.push_back(message.into());
        self
    }

    /// Returns a copy with `message` appended to the warning list.
    #[must_use]
    pub fn with_warning(mut self, message: impl Into<String>) -> Self {
        self.warnings.push_back(message.into());
        self
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
