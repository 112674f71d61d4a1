use async_trait::async_trait;
use chrono::Utc;
use nebula_core::id::GraphId;
use nebula_core::name::GraphName;
use nebula_graph::GraphDef;
use nebula_ports::{GraphRecord, GraphRepo, PortsError};
use parking_lot::Mutex;
use std::collections::HashMap;

/// In-memory [`GraphRepo`]. Guarded by a single mutex — adequate for tests
/// and local experimentation, not a durable store.
#[derive(Default)]
pub struct MemoryGraphRepo {
    rows: Mutex<HashMap<GraphId, GraphRecord>>,
}

impl MemoryGraphRepo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GraphRepo for MemoryGraphRepo {
    async fn create(&self, definition: GraphDef) -> Result<GraphId, PortsError> {
        let id = GraphId::v4();
        let now = Utc::now();
        let record = GraphRecord {
            id,
            definition,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().insert(id, record);
        Ok(id)
    }

    async fn get_by_id(&self, id: GraphId) -> Result<Option<GraphRecord>, PortsError> {
        Ok(self.rows.lock().get(&id).cloned())
    }

    async fn get_by_name(&self, name: &GraphName) -> Result<Option<GraphRecord>, PortsError> {
        Ok(self
            .rows
            .lock()
            .values()
            .find(|record| &record.definition.name == name)
            .cloned())
    }

    async fn list(
        &self,
        skip: usize,
        limit: usize,
        active_only: bool,
    ) -> Result<Vec<GraphRecord>, PortsError> {
        let mut rows: Vec<GraphRecord> = self
            .rows
            .lock()
            .values()
            .filter(|record| !active_only || record.is_active)
            .cloned()
            .collect();
        rows.sort_by_key(|record| record.created_at);
        Ok(rows.into_iter().skip(skip).take(limit).collect())
    }

    async fn soft_delete(&self, id: GraphId) -> Result<bool, PortsError> {
        let mut rows = self.rows.lock();
        if let Some(record) = rows.get_mut(&id) {
            record.is_active = false;
            record.updated_at = Utc::now();
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nebula_core::name::NodeName;

    fn sample_def(name: &str) -> GraphDef {
        GraphDef {
            name: GraphName::new(name).unwrap(),
            description: None,
            nodes: vec![],
            edges: vec![],
            entry_point: NodeName::new("a").unwrap(),
        }
    }

    #[tokio::test]
    async fn create_then_get_by_id_round_trips() {
        let repo = MemoryGraphRepo::new();
        let id = repo.create(sample_def("g1")).await.unwrap();
        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.id, id);
        assert!(fetched.is_active);
    }

    #[tokio::test]
    async fn get_by_name_finds_matching_row() {
        let repo = MemoryGraphRepo::new();
        repo.create(sample_def("g1")).await.unwrap();
        let found = repo
            .get_by_name(&GraphName::new("g1").unwrap())
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn soft_delete_marks_inactive_and_list_can_filter() {
        let repo = MemoryGraphRepo::new();
        let id = repo.create(sample_def("g1")).await.unwrap();
        assert!(repo.soft_delete(id).await.unwrap());

        let active = repo.list(0, 10, true).await.unwrap();
        assert!(active.is_empty());

        let all = repo.list(0, 10, false).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn soft_delete_of_unknown_id_returns_false() {
        let repo = MemoryGraphRepo::new();
        assert!(!repo.soft_delete(GraphId::v4()).await.unwrap());
    }
}
