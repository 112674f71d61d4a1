//! Storage-agnostic repository contract.
//!
//! The coordinator depends only on these traits; any backend satisfying
//! them — the in-memory reference driver in [`nebula_repository_memory`],
//! or a real relational store — is interchangeable.

mod error;
mod execution_log_repo;
mod graph_repo;
mod run_repo;

pub use error::PortsError;
pub use execution_log_repo::ExecutionLogRepo;
pub use graph_repo::{GraphRecord, GraphRepo};
pub use run_repo::{RunDetail, RunRepo};
