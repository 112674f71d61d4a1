use async_trait::async_trait;
use nebula_state::WorkflowState;
use thiserror::Error;

/// Describes a registered tool without needing to invoke it.
#[derive(Debug, Clone)]
pub struct ToolMetadata {
    pub description: String,
    /// Purely synchronous tools are dispatched onto a blocking worker pool by
    /// the engine rather than run inline on the cooperative loop.
    pub synchronous: bool,
}

impl ToolMetadata {
    #[must_use]
    pub fn new(description: impl Into<String>, synchronous: bool) -> Self {
        Self {
            description: description.into(),
            synchronous,
        }
    }
}

/// A failure raised by a tool's own invocation, captured by the Node wrapper
/// and appended to `state.errors` rather than propagated directly.
#[derive(Debug, Error, Clone)]
#[error("{message}")]
pub struct ToolError {
    pub message: String,
}

impl ToolError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A user-supplied function from state to state, registered once by name.
///
/// Object-safe so the registry can store callables behind `Arc<dyn Tool>`,
/// mirroring the teacher's `Action` trait.
#[async_trait]
pub trait Tool: Send + Sync + 'static {
    fn metadata(&self) -> &ToolMetadata;

    async fn call(&self, state: WorkflowState) -> Result<WorkflowState, ToolError>;
}
