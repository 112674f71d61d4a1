use std::collections::{HashMap, HashSet, VecDeque};

use nebula_core::name::{GraphName, NodeName};
use nebula_registry::{PredicateRegistry, ToolRegistry};
use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use serde::{Deserialize, Serialize};

use crate::edge::{Edge, EdgeDef, EdgeManager};
use crate::error::{GraphBuildError, GraphValidationError};
use crate::node::{Node, NodeDef};

/// Persisted graph definition: nodes and edges addressed by name, plus an
/// entry point. This is what travels through storage; [`Graph`] is the
/// transient, executable form built from it at run time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDef {
    pub name: GraphName,
    pub description: Option<String>,
    pub nodes: Vec<NodeDef>,
    pub edges: Vec<EdgeDef>,
    pub entry_point: NodeName,
}

impl GraphDef {
    /// Validates structural invariants, in the order the spec mandates,
    /// returning the first offense found. Does not check tool/predicate
    /// name resolvability — that happens in [`Graph::build`].
    pub fn validate(&self) -> Result<(), GraphValidationError> {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !seen.insert(node.name.clone()) {
                return Err(GraphValidationError::DuplicateNodeName(node.name.clone()));
            }
        }

        if !seen.contains(&self.entry_point) {
            return if self.nodes.is_empty() {
                Err(GraphValidationError::MissingEntryPoint)
            } else {
                Err(GraphValidationError::UnknownEntryPoint(self.entry_point.clone()))
            };
        }

        for edge in &self.edges {
            if !seen.contains(&edge.from) {
                return Err(GraphValidationError::UnknownEdgeSource(edge.from.clone()));
            }
            if !seen.contains(&edge.to) {
                return Err(GraphValidationError::UnknownEdgeTarget(edge.to.clone()));
            }
        }

        for edge in &self.edges {
            if edge.condition.is_none() && edge.from == edge.to {
                return Err(GraphValidationError::UnconditionalSelfLoop(edge.from.clone()));
            }
        }

        let reachable = self.reachable_from_entry();
        for node in &self.nodes {
            if !reachable.contains(&node.name) {
                return Err(GraphValidationError::UnreachableNode(node.name.clone()));
            }
        }

        Ok(())
    }

    fn reachable_from_entry(&self) -> HashSet<NodeName> {
        let mut adjacency: HashMap<&NodeName, Vec<&NodeName>> = HashMap::new();
        for edge in &self.edges {
            adjacency.entry(&edge.from).or_default().push(&edge.to);
        }

        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(self.entry_point.clone());
        queue.push_back(&self.entry_point);

        while let Some(current) = queue.pop_front() {
            if let Some(neighbors) = adjacency.get(current) {
                for next in neighbors {
                    if visited.insert((*next).clone()) {
                        queue.push_back(next);
                    }
                }
            }
        }
        visited
    }

    /// Advisory cycle detection for visualization/UX; does not affect
    /// `validate()`. Returns each non-trivial strongly connected component
    /// (including a single self-looping node) as an ordered list of names.
    #[must_use]
    pub fn find_cycles(&self) -> Vec<Vec<NodeName>> {
        let mut graph = DiGraphMap::<&NodeName, ()>::new();
        for node in &self.nodes {
            graph.add_node(&node.name);
        }
        for edge in &self.edges {
            graph.add_edge(&edge.from, &edge.to, ());
        }

        tarjan_scc(&graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || component
                        .first()
                        .is_some_and(|node| graph.contains_edge(node, node))
            })
            .map(|component| component.into_iter().cloned().collect())
            .collect()
    }

    /// Read-only adjacency summary for visualization/debugging callers: for
    /// each node, its outgoing edge count split into conditional vs
    /// unconditional.
    #[must_use]
    pub fn describe(&self) -> Vec<NodeSummary> {
        let mut summaries: HashMap<NodeName, NodeSummary> = self
            .nodes
            .iter()
            .map(|node| {
                (
                    node.name.clone(),
                    NodeSummary {
                        node: node.name.clone(),
                        unconditional_edges: 0,
                        conditional_edges: 0,
                    },
                )
            })
            .collect();

        for edge in &self.edges {
            if let Some(summary) = summaries.get_mut(&edge.from) {
                if edge.condition.is_some() {
                    summary.conditional_edges += 1;
                } else {
                    summary.unconditional_edges += 1;
                }
            }
        }

        let mut result: Vec<_> = summaries.into_values().collect();
        result.sort_by(|a, b| a.node.as_str().cmp(b.node.as_str()));
        result
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSummary {
    pub node: NodeName,
    pub unconditional_edges: usize,
    pub conditional_edges: usize,
}

/// Transient in-process graph, owning its executable [`Node`] bindings and
/// an [`EdgeManager`]. Built once per run from a [`GraphDef`] and not shared
/// across runs.
#[derive(Clone)]
pub struct Graph {
    pub name: GraphName,
    pub description: Option<String>,
    pub nodes: HashMap<NodeName, Node>,
    pub edges: EdgeManager,
    pub entry_point: NodeName,
}

impl Graph {
    /// Validates `def`, then resolves every node's tool name and every
    /// edge's condition name through the supplied registries, producing an
    /// executable graph. An unknown tool/predicate name fails the build
    /// before any run can be created against it.
    pub fn build(
        def: &GraphDef,
        tools: &ToolRegistry,
        predicates: &PredicateRegistry,
    ) -> Result<Self, GraphBuildError> {
        def.validate()?;

        let mut nodes = HashMap::with_capacity(def.nodes.len());
        for node_def in &def.nodes {
            let tool = tools.get(&node_def.tool)?;
            nodes.insert(
                node_def.name.clone(),
                Node::new(node_def.name.clone(), tool, node_def.metadata.clone()),
            );
        }

        let mut edges = Vec::with_capacity(def.edges.len());
        for edge_def in &def.edges {
            let condition = match &edge_def.condition {
                Some(name) => Some((name.clone(), predicates.get(name)?)),
                None => None,
            };
            edges.push(Edge {
                from: edge_def.from.clone(),
                to: edge_def.to.clone(),
                condition,
            });
        }

        Ok(Self {
            name: def.name.clone(),
            description: def.description.clone(),
            nodes,
            edges: EdgeManager::new(edges),
            entry_point: def.entry_point.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeMetadata;

    fn node(name: &str, tool: &str) -> NodeDef {
        NodeDef {
            name: NodeName::new(name).unwrap(),
            tool: nebula_core::name::ToolName::new(tool).unwrap(),
            metadata: NodeMetadata::default(),
        }
    }

    fn edge(from: &str, to: &str) -> EdgeDef {
        EdgeDef {
            from: NodeName::new(from).unwrap(),
            to: NodeName::new(to).unwrap(),
            condition: None,
        }
    }

    #[test]
    fn single_node_no_edges_is_valid() {
        let def = GraphDef {
            name: GraphName::new("solo").unwrap(),
            description: None,
            nodes: vec![node("a", "echo")],
            edges: vec![],
            entry_point: NodeName::new("a").unwrap(),
        };
        assert!(def.validate().is_ok());
    }

    #[test]
    fn unknown_entry_point_is_rejected() {
        let def = GraphDef {
            name: GraphName::new("g").unwrap(),
            description: None,
            nodes: vec![node("a", "echo")],
            edges: vec![],
            entry_point: NodeName::new("missing").unwrap(),
        };
        assert_eq!(
            def.validate().unwrap_err(),
            GraphValidationError::UnknownEntryPoint(NodeName::new("missing").unwrap())
        );
    }

    #[test]
    fn unconditional_self_loop_is_rejected() {
        let def = GraphDef {
            name: GraphName::new("g").unwrap(),
            description: None,
            nodes: vec![node("a", "echo")],
            edges: vec![edge("a", "a")],
            entry_point: NodeName::new("a").unwrap(),
        };
        assert_eq!(
            def.validate().unwrap_err(),
            GraphValidationError::UnconditionalSelfLoop(NodeName::new("a").unwrap())
        );
    }

    #[test]
    fn unreachable_node_is_rejected() {
        let def = GraphDef {
            name: GraphName::new("g").unwrap(),
            description: None,
            nodes: vec![node("a", "echo"), node("b", "echo")],
            edges: vec![],
            entry_point: NodeName::new("a").unwrap(),
        };
        assert_eq!(
            def.validate().unwrap_err(),
            GraphValidationError::UnreachableNode(NodeName::new("b").unwrap())
        );
    }

    #[test]
    fn linear_graph_is_valid() {
        let def = GraphDef {
            name: GraphName::new("g").unwrap(),
            description: None,
            nodes: vec![node("a", "echo"), node("b", "echo")],
            edges: vec![edge("a", "b")],
            entry_point: NodeName::new("a").unwrap(),
        };
        assert!(def.validate().is_ok());
    }

    #[test]
    fn cycles_are_allowed_and_detected_but_do_not_fail_validation() {
        let def = GraphDef {
            name: GraphName::new("g").unwrap(),
            description: None,
            nodes: vec![node("a", "echo"), node("b", "echo")],
            edges: vec![
                edge("a", "b"),
                EdgeDef {
                    from: NodeName::new("b").unwrap(),
                    to: NodeName::new("a").unwrap(),
                    condition: Some(nebula_core::name::PredicateName::new("loop_again").unwrap()),
                },
            ],
            entry_point: NodeName::new("a").unwrap(),
        };
        assert!(def.validate().is_ok());
        let cycles = def.find_cycles();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 2);
    }

    #[test]
    fn describe_counts_conditional_and_unconditional_edges() {
        let def = GraphDef {
            name: GraphName::new("g").unwrap(),
            description: None,
            nodes: vec![node("a", "echo"), node("b", "echo"), node("c", "echo")],
            edges: vec![
                edge("a", "b"),
                EdgeDef {
                    from: NodeName::new("a").unwrap(),
                    to: NodeName::new("c").unwrap(),
                    condition: Some(nebula_core::name::PredicateName::new("maybe").unwrap()),
                },
            ],
            entry_point: NodeName::new("a").unwrap(),
        };
        let summary = def.describe();
        let a_summary = summary.iter().find(|s| s.node.as_str() == "a").unwrap();
        assert_eq!(a_summary.unconditional_edges, 1);
        assert_eq!(a_summary.conditional_edges, 1);
    }
}
