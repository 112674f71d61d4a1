//! In-memory reference implementations of the [`nebula_ports`] repository
//! traits.
//!
//! Stands in for a real durable store (a relational database, per
//! `spec.md` §6) in tests and local experimentation — not itself the
//! durable backend the core's Non-goals exclude.

mod execution_log_repo;
mod graph_repo;
mod run_repo;

pub use execution_log_repo::MemoryExecutionLogRepo;
pub use graph_repo::MemoryGraphRepo;
pub use run_repo::MemoryRunRepo;
