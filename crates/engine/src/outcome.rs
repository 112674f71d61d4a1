use nebula_execution::RunStatus;
use nebula_state::WorkflowState;

/// The result of walking a graph to completion or termination. Node
/// failures, edge condition failures, max-iterations, and cancellation are
/// all represented here as a terminal `status` rather than as an `Err` —
/// they are ordinary run outcomes the coordinator persists, not exceptions.
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    pub state: WorkflowState,
    pub status: RunStatus,
    /// Count of executed nodes (completed + failed), per §9's resolution of
    /// the "what counts as an iteration" open question.
    pub total_iterations: u64,
    pub total_duration_ms: u64,
    pub error_message: Option<String>,
}
