//! Run lifecycle coordination.
//!
//! [`RunCoordinator`] mediates between an external caller, the
//! [`nebula_engine`] traversal loop, a [`nebula_ports::RunRepo`] /
//! [`nebula_ports::GraphRepo`] / [`nebula_ports::ExecutionLogRepo`]
//! implementation, and a [`nebula_eventbus::Broker`]. It allocates a run
//! identifier, persists the `pending` row, and schedules execution as a
//! background task — returning control to the caller before the graph
//! starts walking.

mod config;
mod coordinator;
mod error;
mod options;

pub use config::CoordinatorConfig;
pub use coordinator::{RunCoordinator, RunEventStream};
pub use error::CoordinatorError;
pub use options::RunOptions;
