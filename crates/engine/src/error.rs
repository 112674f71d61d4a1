use nebula_ports::PortsError;
use thiserror::Error;

/// Errors that abort the engine loop itself, as opposed to terminal run
/// outcomes (node failure, max-iterations, timeout, cancellation) which the
/// engine reports as a [`crate::ExecutionOutcome`] rather than an `Err` —
/// those are ordinary run lifecycle results the coordinator persists, not
/// exceptional engine failures.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The execution log could not be appended. The engine does not retry
    /// persistence operations itself; bounded-backoff retry, if any, is the
    /// coordinator's responsibility.
    #[error(transparent)]
    Log(#[from] PortsError),
}
