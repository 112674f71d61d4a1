use std::sync::Arc;
use std::time::Instant;

use nebula_core::name::{NodeName, ToolName};
use nebula_registry::Tool;
use nebula_state::WorkflowState;
use serde::{Deserialize, Serialize};

/// Serializable binding of a name to a tool reference, as stored in a
/// persisted graph definition. Optional metadata carries a description,
/// version, and author for documentation purposes only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDef {
    pub name: NodeName,
    pub tool: ToolName,
    #[serde(default)]
    pub metadata: NodeMetadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeMetadata {
    pub description: Option<String>,
    pub version: Option<String>,
    pub author: Option<String>,
}

/// Outcome of invoking a node's tool against a state, with timing attached.
#[derive(Debug, Clone)]
pub enum NodeOutcome {
    Completed {
        state: WorkflowState,
        duration_ms: u64,
    },
    Failed {
        /// The state with the failure appended to `errors`.
        state: WorkflowState,
        message: String,
        duration_ms: u64,
    },
}

/// An executable binding of a name to an in-process tool, resolved from a
/// [`NodeDef`] through the tool registry at graph-build time. A node is
/// constructed once per run from a graph definition; it is not persisted
/// separately.
#[derive(Clone)]
pub struct Node {
    pub name: NodeName,
    pub tool: Arc<dyn Tool>,
    pub metadata: NodeMetadata,
}

impl Node {
    #[must_use]
    pub fn new(name: NodeName, tool: Arc<dyn Tool>, metadata: NodeMetadata) -> Self {
        Self {
            name,
            tool,
            metadata,
        }
    }

    /// Invokes the tool against `state`, recording timing end-to-end and
    /// catching any tool failure rather than letting it propagate.
    ///
    /// Tools flagged synchronous in their metadata are dispatched onto the
    /// blocking worker pool so they cannot stall the engine's cooperative
    /// loop.
    pub async fn execute(&self, state: WorkflowState) -> NodeOutcome {
        let started = Instant::now();
        let synchronous = self.tool.metadata().synchronous;
        let tool = Arc::clone(&self.tool);

        let result = if synchronous {
            let input = state.clone();
            match tokio::task::spawn_blocking(move || futures::executor::block_on(tool.call(input)))
                .await
            {
                Ok(result) => result,
                Err(join_err) => Err(nebula_registry::ToolError::new(format!(
                    "tool `{}` panicked: {join_err}",
                    self.name
                ))),
            }
        } else {
            tool.call(state.clone()).await
        };

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        match result {
            Ok(next_state) => NodeOutcome::Completed {
                state: next_state,
                duration_ms,
            },
            Err(err) => {
                let failed_state = state.with_error(format!("{}: {}", self.name, err.message));
                NodeOutcome::Failed {
                    state: failed_state,
                    message: err.message,
                    duration_ms,
                }
            }
        }
    }
}
