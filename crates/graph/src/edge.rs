use std::collections::HashMap;
use std::sync::Arc;

use nebula_core::name::{NodeName, PredicateName};
use nebula_registry::Predicate;
use nebula_state::WorkflowState;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Serializable directed transition between two nodes, as stored in a
/// persisted graph definition. `condition`, when present, names a predicate
/// resolved through the predicate registry at graph-build time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeDef {
    pub from: NodeName,
    pub to: NodeName,
    pub condition: Option<PredicateName>,
}

/// A failure raised while evaluating an edge's condition. Aborts the run.
#[derive(Debug, Error, Clone)]
#[error("edge condition `{predicate}` on `{from}` -> `{to}` failed: {message}")]
pub struct EdgeConditionError {
    pub from: NodeName,
    pub to: NodeName,
    pub predicate: PredicateName,
    pub message: String,
}

/// Executable directed transition; `condition` is the resolved callable
/// rather than a name, so no registry lookup is needed at traversal time.
#[derive(Clone)]
pub struct Edge {
    pub from: NodeName,
    pub to: NodeName,
    pub condition: Option<(PredicateName, Arc<dyn Predicate>)>,
}

/// Indexes edges by source node for O(1) outgoing-edge lookup. Edges within
/// a source node's list are evaluated in insertion order; the first selected
/// edge wins ("fallthrough" edges should be registered last).
#[derive(Clone, Default)]
pub struct EdgeManager {
    outgoing: HashMap<NodeName, Vec<Edge>>,
}

impl EdgeManager {
    #[must_use]
    pub fn new(edges: Vec<Edge>) -> Self {
        let mut outgoing: HashMap<NodeName, Vec<Edge>> = HashMap::new();
        for edge in edges {
            outgoing.entry(edge.from.clone()).or_default().push(edge);
        }
        Self { outgoing }
    }

    #[must_use]
    pub fn outgoing(&self, from: &NodeName) -> &[Edge] {
        self.outgoing.get(from).map_or(&[], Vec::as_slice)
    }

    /// Resolves the next node name given the current node and state.
    /// Returns `Ok(None)` when no edge is selected (the current node is a
    /// terminal).
    pub async fn next(
        &self,
        current: &NodeName,
        state: &WorkflowState,
    ) -> Result<Option<NodeName>, EdgeConditionError> {
        for edge in self.outgoing(current) {
            match &edge.condition {
                None => return Ok(Some(edge.to.clone())),
                Some((name, predicate)) => {
                    let selected = predicate.evaluate(state).await.map_err(|err| {
                        EdgeConditionError {
                            from: edge.from.clone(),
                            to: edge.to.clone(),
                            predicate: name.clone(),
                            message: err.message,
                        }
                    })?;
                    if selected {
                        return Ok(Some(edge.to.clone()));
                    }
                }
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use nebula_core::id::{RunId, WorkflowId};
    use nebula_registry::PredicateError;
    use serde_json::Map;

    use super::*;

    struct AlwaysTrue;
    #[async_trait]
    impl Predicate for AlwaysTrue {
        async fn evaluate(&self, _state: &WorkflowState) -> Result<bool, PredicateError> {
            Ok(true)
        }
    }

    struct AlwaysFalse;
    #[async_trait]
    impl Predicate for AlwaysFalse {
        async fn evaluate(&self, _state: &WorkflowState) -> Result<bool, PredicateError> {
            Ok(false)
        }
    }

    fn sample_state() -> WorkflowState {
        WorkflowState::new(WorkflowId::v4(), RunId::v4(), Map::new())
    }

    #[tokio::test]
    async fn unconditional_edge_is_selected() {
        let a = NodeName::new("a").unwrap();
        let b = NodeName::new("b").unwrap();
        let manager = EdgeManager::new(vec![Edge {
            from: a.clone(),
            to: b.clone(),
            condition: None,
        }]);
        assert_eq!(manager.next(&a, &sample_state()).await.unwrap(), Some(b));
    }

    #[tokio::test]
    async fn first_inserted_unconditional_edge_wins_on_tie() {
        let a = NodeName::new("a").unwrap();
        let b = NodeName::new("b").unwrap();
        let c = NodeName::new("c").unwrap();
        let manager = EdgeManager::new(vec![
            Edge { from: a.clone(), to: b.clone(), condition: None },
            Edge { from: a.clone(), to: c.clone(), condition: None },
        ]);
        assert_eq!(manager.next(&a, &sample_state()).await.unwrap(), Some(b));
    }

    #[tokio::test]
    async fn all_false_predicates_terminate_cleanly() {
        let a = NodeName::new("a").unwrap();
        let b = NodeName::new("b").unwrap();
        let manager = EdgeManager::new(vec![Edge {
            from: a.clone(),
            to: b,
            condition: Some((PredicateName::new("never").unwrap(), Arc::new(AlwaysFalse))),
        }]);
        assert_eq!(manager.next(&a, &sample_state()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn conditional_edge_selected_when_predicate_true() {
        let a = NodeName::new("a").unwrap();
        let b = NodeName::new("b").unwrap();
        let manager = EdgeManager::new(vec![Edge {
            from: a.clone(),
            to: b.clone(),
            condition: Some((PredicateName::new("always").unwrap(), Arc::new(AlwaysTrue))),
        }]);
        assert_eq!(manager.next(&a, &sample_state()).await.unwrap(), Some(b));
    }

    #[tokio::test]
    async fn node_with_no_outgoing_edges_is_terminal() {
        let a = NodeName::new("a").unwrap();
        let manager = EdgeManager::new(vec![]);
        assert_eq!(manager.next(&a, &sample_state()).await.unwrap(), None);
    }
}
