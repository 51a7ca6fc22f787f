use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::data::{CoreError, CoreResult, GraphSnapshot, RequestContext};
use crate::services::expander;
use crate::storage::GraphStore;

/// Number of seed nodes a search returns unless configured otherwise.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Answers free-text queries with a one-hop graph snapshot.
#[derive(Clone)]
pub struct SearchService {
    store: Arc<dyn GraphStore>,
    default_limit: usize,
}

impl SearchService {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self {
            store,
            default_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Overrides the seed cap used by [`SearchService::search_default`].
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    /// Searches with the configured seed cap.
    pub async fn search_default(
        &self,
        ctx: &RequestContext,
        query_text: &str,
    ) -> CoreResult<GraphSnapshot> {
        self.search(ctx, query_text, self.default_limit).await
    }

    /// Finds up to `limit` seed nodes matching `query_text`, expands one hop
    /// around them and hydrates every node involved.
    ///
    /// Every returned edge has both endpoints among the returned nodes. `path`
    /// holds the first seed's id, or nothing when no node matched.
    #[instrument(skip(self, ctx), fields(trace_id = %ctx.trace_id()))]
    pub async fn search(
        &self,
        ctx: &RequestContext,
        query_text: &str,
        limit: usize,
    ) -> CoreResult<GraphSnapshot> {
        let query = query_text.trim();
        if query.is_empty() {
            return Err(CoreError::ValidationError(
                "query text must not be empty".to_string(),
            ));
        }
        if limit == 0 {
            return Err(CoreError::ValidationError(
                "limit must be at least 1".to_string(),
            ));
        }

        let seeds = ctx
            .run("find_matching_nodes", self.store.find_matching_nodes(query, limit))
            .await?;

        if seeds.is_empty() {
            info!(query = %query, "Search matched no nodes");
            return Ok(GraphSnapshot::default());
        }

        let path = vec![seeds[0].id];
        let seed_ids: HashSet<_> = seeds.iter().map(|n| n.id).collect();

        let neighborhood = expander::expand(&self.store, ctx, &seed_ids).await?;

        let mut all_ids = neighborhood.connected_node_ids;
        all_ids.extend(seed_ids.iter().copied());

        let nodes = ctx
            .run("get_nodes_by_ids", self.store.get_nodes_by_ids(&all_ids))
            .await?;

        // A concurrent delete can remove an endpoint between the edge read
        // and hydration; such edges are dropped.
        let hydrated: HashSet<_> = nodes.iter().map(|n| n.id).collect();
        let total_edges = neighborhood.edges.len();
        let edges: Vec<_> = neighborhood
            .edges
            .into_iter()
            .filter(|e| hydrated.contains(&e.from_node_id) && hydrated.contains(&e.to_node_id))
            .collect();

        if edges.len() < total_edges {
            debug!(
                dropped = total_edges - edges.len(),
                "Dropped edges with vanished endpoints"
            );
        }

        info!(
            query = %query,
            seeds = seed_ids.len(),
            nodes = nodes.len(),
            edges = edges.len(),
            "Search completed"
        );

        Ok(GraphSnapshot { nodes, edges, path })
    }
}
