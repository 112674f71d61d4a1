use nebula_core::name::NodeName;
use nebula_registry::RegistryError;
use thiserror::Error;

/// Raised by [`crate::graph::GraphDef::validate`]. Names the first offense
/// found, checked in the fixed order the spec mandates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphValidationError {
    #[error("graph has no entry point")]
    MissingEntryPoint,

    #[error("entry point `{0}` names no known node")]
    UnknownEntryPoint(NodeName),

    #[error("duplicate node name `{0}`")]
    DuplicateNodeName(NodeName),

    #[error("edge references unknown source node `{0}`")]
    UnknownEdgeSource(NodeName),

    #[error("edge references unknown target node `{0}`")]
    UnknownEdgeTarget(NodeName),

    #[error("node `{0}` has an unconditional self-loop")]
    UnconditionalSelfLoop(NodeName),

    #[error("node `{0}` is not reachable from the entry point")]
    UnreachableNode(NodeName),
}

/// Raised when resolving a [`crate::graph::GraphDef`]'s tool/predicate names
/// into an executable [`crate::graph::Graph`].
#[derive(Debug, Error)]
pub enum GraphBuildError {
    #[error(transparent)]
    Validation(#[from] GraphValidationError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
