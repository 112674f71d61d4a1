//! Shared error kinds used across the orchestration core.

use thiserror::Error;

/// Errors that originate from core identifier/primitive handling.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A string could not be parsed as a UUID-backed identifier.
    #[error("invalid identifier `{0}`")]
    InvalidId(String),

    /// A name did not satisfy the naming rules for graph/node/tool identifiers.
    #[error("invalid name `{0}`: {reason}", reason = .1)]
    InvalidName(String, String),
}

/// Result type used throughout the orchestration core.
pub type Result<T> = std::result::Result<T, CoreError>;
