//! Graph definition repository port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nebula_core::id::GraphId;
use nebula_core::name::GraphName;
use nebula_graph::GraphDef;

use crate::error::PortsError;

/// A persisted graph definition plus the administrative fields a storage
/// row carries alongside it (soft-delete flag, timestamps).
#[derive(Debug, Clone)]
pub struct GraphRecord {
    pub id: GraphId,
    pub definition: GraphDef,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Persistence interface for graph definitions. Any storage that satisfies
/// this trait can back the coordinator; the core depends only on the
/// interface.
#[async_trait]
pub trait GraphRepo: Send + Sync {
    /// Persists a new graph definition, returning its allocated id.
    async fn create(&self, definition: GraphDef) -> Result<GraphId, PortsError>;

    async fn get_by_id(&self, id: GraphId) -> Result<Option<GraphRecord>, PortsError>;

    async fn get_by_name(&self, name: &GraphName) -> Result<Option<GraphRecord>, PortsError>;

    /// Lists graph definitions with pagination, optionally restricted to
    /// non-deleted rows.
    async fn list(
        &self,
        skip: usize,
        limit: usize,
        active_only: bool,
    ) -> Result<Vec<GraphRecord>, PortsError>;

    /// Marks a graph as inactive without removing its row. Returns `true` if
    /// a row existed to delete.
    async fn soft_delete(&self, id: GraphId) -> Result<bool, PortsError>;
}
