//! String-keyed identifiers.
//!
//! Nodes, tools, predicates, and graphs are addressed by name rather than by
//! UUID (unlike [`crate::id`]'s entity identifiers) — this mirrors how a
//! serialized graph definition references its nodes and registered tools by
//! name so it can travel through persistence and be rehydrated against a
//! process-local registry.

use domain_key::{define_domain, key_type};

pub use domain_key::KeyParseError;

define_domain!(NodeNameDomain, "node");
key_type!(NodeName, NodeNameDomain);

define_domain!(ToolNameDomain, "tool");
key_type!(ToolName, ToolNameDomain);

define_domain!(PredicateNameDomain, "predicate");
key_type!(PredicateName, PredicateNameDomain);

define_domain!(GraphNameDomain, "graph");
key_type!(GraphName, GraphNameDomain);
