use nebula_core::name::GraphName;
use nebula_graph::GraphBuildError;
use nebula_ports::PortsError;
use thiserror::Error;

/// Errors the coordinator surfaces to its caller. Distinct from the
/// per-run terminal status the engine reports — node failure, timeout,
/// max-iterations, and cancellation are ordinary run outcomes persisted on
/// the `Run` row, not exceptions raised back through this API.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// No graph is registered under this name; no `Run` row is created.
    #[error("graph not found: {0}")]
    GraphNotFound(GraphName),

    /// No run is registered under this id.
    #[error("run not found: {0}")]
    RunNotFound(String),

    /// The graph definition failed validation, or one of its node/edge
    /// names did not resolve through the tool/predicate registry. No `Run`
    /// row is created for this failure.
    #[error(transparent)]
    GraphBuild(#[from] GraphBuildError),

    /// A repository operation failed.
    #[error(transparent)]
    Ports(#[from] PortsError),
}
