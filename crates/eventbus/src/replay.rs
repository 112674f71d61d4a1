//! Synthesizes the late-join terminal event from a persisted `Run` row.

use nebula_execution::Run;

use crate::event::Event;

/// Reconstructs the `WorkflowCompleted` event a subscriber would have seen
/// live, from a `Run` row already in a terminal status. Returns `None` if
/// the run has not reached a terminal status — the caller should fall back
/// to a live subscription in that case.
#[must_use]
pub fn synthesize_terminal_event(run: &Run) -> Option<Event> {
    if !run.status.is_terminal() {
        return None;
    }
    Some(Event::WorkflowCompleted {
        run_id: run.run_id,
        status: run.status,
        final_state: run.final_state.clone(),
        total_duration_ms: run.total_execution_time_ms.unwrap_or(0),
        total_iterations: run.total_iterations.unwrap_or(0),
        error_message: run.error_message.clone(),
    })
}
