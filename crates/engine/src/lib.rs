//! Sequential graph-traversal execution engine.
//!
//! `execute` is the central algorithm: single-node-at-a-time traversal with
//! conditional edge routing, a hard iteration bound, cooperative
//! cancellation and timeout checks at the loop head, and per-node
//! logging/event publication ordered so a subscriber's view is never ahead
//! of the repository's.

mod engine;
mod error;
mod options;
mod outcome;

pub use engine::execute;
pub use error::EngineError;
pub use options::EngineOptions;
pub use outcome::ExecutionOutcome;
