//! Single-record operations on the graph, run under a request context.

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::data::{CoreError, CoreResult, Edge, NewNode, Node, NodeId, RelationType, RequestContext};
use crate::storage::GraphStore;

#[derive(Clone)]
pub struct NodeService {
    store: Arc<dyn GraphStore>,
}

impl NodeService {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn GraphStore> {
        &self.store
    }

    /// Looks up a node, mapping absence to `CoreError::NotFound`.
    #[instrument(skip(self, ctx), fields(trace_id = %ctx.trace_id()))]
    pub async fn get_node(&self, ctx: &RequestContext, id: &NodeId) -> CoreResult<Node> {
        ctx.run("get_node", self.store.get_node(id))
            .await?
            .ok_or_else(|| CoreError::not_found("Node", id.to_string()))
    }

    #[instrument(skip(self, ctx, node), fields(trace_id = %ctx.trace_id(), title = %node.title))]
    pub async fn create_node(&self, ctx: &RequestContext, node: NewNode) -> CoreResult<Node> {
        let node = ctx.run("create_node", self.store.create_node(node)).await?;
        debug!(node_id = %node.id, "Created node");
        Ok(node)
    }

    #[instrument(skip(self, ctx), fields(trace_id = %ctx.trace_id()))]
    pub async fn create_edge(
        &self,
        ctx: &RequestContext,
        from: &NodeId,
        to: &NodeId,
        relation_type: RelationType,
    ) -> CoreResult<Edge> {
        let result = ctx
            .run("create_edge", self.store.create_edge(from, to, relation_type))
            .await;
        if let Err(CoreError::ReferentialIntegrity { missing, .. }) = &result {
            warn!(missing = %missing, "Rejected edge with missing endpoint");
        }
        result
    }

    /// Deletes a node together with every edge touching it.
    #[instrument(skip(self, ctx), fields(trace_id = %ctx.trace_id()))]
    pub async fn delete_node(&self, ctx: &RequestContext, id: &NodeId) -> CoreResult<bool> {
        let deleted = ctx.run("delete_node", self.store.delete_node(id)).await?;
        if deleted {
            info!(node_id = %id, "Deleted node and its edges");
        }
        Ok(deleted)
    }

    #[instrument(skip(self, ctx), fields(trace_id = %ctx.trace_id()))]
    pub async fn clear(&self, ctx: &RequestContext) -> CoreResult<()> {
        ctx.run("clear", self.store.clear()).await?;
        info!("Cleared graph");
        Ok(())
    }

    pub async fn health_check(&self, ctx: &RequestContext) -> CoreResult<bool> {
        ctx.run("health_check", self.store.health_check()).await
    }
}
