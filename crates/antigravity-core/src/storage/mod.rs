use async_trait::async_trait;
use std::collections::HashSet;

use crate::data::{CoreResult, Edge, NewNode, Node, NodeId, RelationType};

pub mod memory;


pub use memory::InMemoryGraphStore;

/// Storage interface for the knowledge graph.
///
/// The store is the sole owner of the node and edge collections. Every
/// operation is persisted before it returns. Implementations must make each
/// single create/delete atomic; nothing stronger than read committed is
/// assumed across calls.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait GraphStore: Send + Sync + 'static {
    /// Assigns a fresh id and timestamps, stores and returns the record.
    async fn create_node(&self, node: NewNode) -> CoreResult<Node>;

    /// Exact lookup by id.
    async fn get_node(&self, id: &NodeId) -> CoreResult<Option<Node>>;

    /// Every stored node whose id is in `ids`. Missing ids are skipped.
    async fn get_nodes_by_ids(&self, ids: &HashSet<NodeId>) -> CoreResult<Vec<Node>>;

    /// Nodes whose title or AI summary contains `needle` case-insensitively,
    /// ordered by `(created_at, id)` and capped at `limit`.
    async fn find_matching_nodes(&self, needle: &str, limit: usize) -> CoreResult<Vec<Node>>;

    /// Fails with `CoreError::ReferentialIntegrity` and stores nothing when
    /// either endpoint is absent.
    async fn create_edge(
        &self,
        from: &NodeId,
        to: &NodeId,
        relation_type: RelationType,
    ) -> CoreResult<Edge>;

    /// Every edge with `from_node_id` or `to_node_id` in `ids`.
    async fn get_edges_touching(&self, ids: &HashSet<NodeId>) -> CoreResult<Vec<Edge>>;

    /// Deletes a node and, atomically with it, every edge that references it.
    /// Returns `false` when the node did not exist.
    async fn delete_node(&self, id: &NodeId) -> CoreResult<bool>;

    /// Deletes all edges, then all nodes.
    async fn clear(&self) -> CoreResult<()>;

    /// Liveness of the backing storage.
    async fn health_check(&self) -> CoreResult<bool>;
}
