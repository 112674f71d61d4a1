//! Run lifecycle records and per-node execution log entries.
//!
//! These are the persisted shapes the repository contract
//! ([`nebula_ports`]) reads and writes; this crate only defines the types
//! and their state machine, not the storage mechanism.

mod error;
mod log;
mod run;
mod status;
mod transition;

pub use error::ExecutionError;
pub use log::ExecutionLog;
pub use run::Run;
pub use status::{NodeExecutionStatus, RunStatus};
pub use transition::{can_transition_run, validate_run_transition};
