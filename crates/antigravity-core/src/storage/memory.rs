use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::data::{CoreError, CoreResult, Edge, EdgeId, NewNode, Node, NodeId, RelationType};
use crate::storage::GraphStore;

#[derive(Default)]
struct GraphState {
    nodes: HashMap<NodeId, Node>,
    edges: HashMap<EdgeId, Edge>,
}

/// In-memory graph store.
///
/// Both collections sit behind a single lock, so every operation (including
/// the endpoint check in `create_edge` and the cascade in `delete_node`) is
/// atomic with respect to the others.
#[derive(Clone, Default)]
pub struct InMemoryGraphStore {
    state: Arc<RwLock<GraphState>>,
}

impl fmt::Debug for InMemoryGraphStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryGraphStore").finish_non_exhaustive()
    }
}

impl InMemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored nodes and edges.
    pub async fn counts(&self) -> (usize, usize) {
        let state = self.state.read().await;
        (state.nodes.len(), state.edges.len())
    }
}

#[async_trait]
impl GraphStore for InMemoryGraphStore {
    async fn create_node(&self, node: NewNode) -> CoreResult<Node> {
        let mut state = self.state.write().await;
        let node = Node::from_new(NodeId::new_v4(), node, Utc::now());
        state.nodes.insert(node.id, node.clone());
        debug!(node_id = %node.id, title = %node.title, "Stored node");
        Ok(node)
    }

    async fn get_node(&self, id: &NodeId) -> CoreResult<Option<Node>> {
        let state = self.state.read().await;
        Ok(state.nodes.get(id).cloned())
    }

    async fn get_nodes_by_ids(&self, ids: &HashSet<NodeId>) -> CoreResult<Vec<Node>> {
        let state = self.state.read().await;
        Ok(ids.iter().filter_map(|id| state.nodes.get(id).cloned()).collect())
    }

    async fn find_matching_nodes(&self, needle: &str, limit: usize) -> CoreResult<Vec<Node>> {
        let needle = needle.to_lowercase();
        let state = self.state.read().await;

        let mut matches: Vec<&Node> = state
            .nodes
            .values()
            .filter(|n| n.matches_lowercase(&needle))
            .collect();
        matches.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));

        Ok(matches.into_iter().take(limit).cloned().collect())
    }

    async fn create_edge(
        &self,
        from: &NodeId,
        to: &NodeId,
        relation_type: RelationType,
    ) -> CoreResult<Edge> {
        let mut state = self.state.write().await;

        for endpoint in [from, to] {
            if !state.nodes.contains_key(endpoint) {
                return Err(CoreError::ReferentialIntegrity {
                    from: *from,
                    to: *to,
                    missing: *endpoint,
                });
            }
        }

        let edge = Edge {
            id: EdgeId::new_v4(),
            from_node_id: *from,
            to_node_id: *to,
            relation_type,
        };
        state.edges.insert(edge.id, edge.clone());
        debug!(edge_id = %edge.id, from = %from, to = %to, relation = %relation_type, "Stored edge");
        Ok(edge)
    }

    async fn get_edges_touching(&self, ids: &HashSet<NodeId>) -> CoreResult<Vec<Edge>> {
        let state = self.state.read().await;
        Ok(state
            .edges
            .values()
            .filter(|e| e.touches_any(ids))
            .cloned()
            .collect())
    }

    async fn delete_node(&self, id: &NodeId) -> CoreResult<bool> {
        let mut state = self.state.write().await;
        if state.nodes.remove(id).is_none() {
            return Ok(false);
        }
        let before = state.edges.len();
        state.edges.retain(|_, e| !e.touches(id));
        debug!(node_id = %id, removed_edges = before - state.edges.len(), "Deleted node");
        Ok(true)
    }

    async fn clear(&self) -> CoreResult<()> {
        let mut state = self.state.write().await;
        state.edges.clear();
        state.nodes.clear();
        Ok(())
    }

    async fn health_check(&self) -> CoreResult<bool> {
        Ok(true)
    }
}
