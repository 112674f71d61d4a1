use async_trait::async_trait;
use nebula_state::WorkflowState;
use thiserror::Error;

/// A failure raised while evaluating an edge's condition. Aborts the run.
#[derive(Debug, Error, Clone)]
#[error("{message}")]
pub struct PredicateError {
    pub message: String,
}

impl PredicateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A pure-ish function of state returning a boolean, evaluated when deciding
/// whether an edge is taken. Evaluation is treated as potentially suspending.
#[async_trait]
pub trait Predicate: Send + Sync + 'static {
    async fn evaluate(&self, state: &WorkflowState) -> Result<bool, PredicateError>;
}
