//! Graph definition, edge resolution, and structural validation.
//!
//! A [`graph::GraphDef`] is the serializable shape a workflow travels through
//! persistence as; [`graph::Graph`] is the transient, executable form the
//! engine walks, built by resolving tool/predicate names through the
//! registries in [`nebula_registry`].

mod edge;
mod error;
mod graph;
mod node;

pub use edge::{Edge, EdgeConditionError, EdgeDef, EdgeManager};
pub use error::{GraphBuildError, GraphValidationError};
pub use graph::{Graph, GraphDef, NodeSummary};
pub use node::{Node, NodeDef, NodeMetadata, NodeOutcome};
