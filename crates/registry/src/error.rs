use nebula_core::name::{PredicateName, ToolName};
use thiserror::Error;

/// Errors raised by tool/predicate registration and lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A serialized graph referenced a tool name with no registered callable.
    #[error("tool not found: {0}")]
    ToolNotFound(ToolName),

    /// Re-registering an already-registered tool name.
    ///
    /// The registry does not silently overwrite on re-registration — unlike
    /// the teacher's action registry, which treats re-registration as an
    /// update. Idempotent-registration failure is required here instead.
    #[error("tool already registered: {0}")]
    ToolAlreadyRegistered(ToolName),

    /// A serialized edge referenced a predicate name with no registered
    /// callable.
    #[error("predicate not found: {0}")]
    PredicateNotFound(PredicateName),

    /// Re-registering an already-registered predicate name.
    #[error("predicate already registered: {0}")]
    PredicateAlreadyRegistered(PredicateName),
}
