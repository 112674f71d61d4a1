//! Unique identifiers for orchestration entities.
//!
//! Strongly-typed UUID identifiers using [`domain-key`](https://crates.io/crates/domain-key)
//! `Uuid<D>` wrappers. Each identifier type is parameterized by a unique domain
//! marker, so `WorkflowId` and `RunId` cannot be mixed up at compile time even
//! though both wrap a `Uuid` underneath.
//!
//! All ID types are `Copy` (16 bytes, stack-allocated) and support `v4()`,
//! `parse(&str)`, and full serde round-tripping as a UUID string.

use domain_key::define_uuid;

pub use domain_key::UuidParseError;

define_uuid!(GraphIdDomain => GraphId);
define_uuid!(WorkflowIdDomain => WorkflowId);
define_uuid!(RunIdDomain => RunId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_id_v4_is_non_nil() {
        let id = RunId::v4();
        assert!(!id.is_nil());
    }

    #[test]
    fn graph_id_parse_roundtrips() {
        let id = GraphId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
    }

    #[test]
    fn graph_id_parse_invalid_errors() {
        assert!(GraphId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn workflow_and_run_ids_are_distinct_types() {
        fn accepts_workflow(_: WorkflowId) {}
        fn accepts_run(_: RunId) {}
        accepts_workflow(WorkflowId::v4());
        accepts_run(RunId::v4());
    }

    #[test]
    fn id_serde_json_roundtrip() {
        let id = RunId::v4();
        let json = serde_json::to_string(&id).unwrap();
        let back: RunId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
