//! Neighborhood expansion around a set of seed nodes.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::data::{Neighborhood, NodeId, RequestContext};
use crate::data::errors::CoreResult;
use crate::storage::GraphStore;

/// Collects every edge touching a seed and both endpoints of each.
///
/// Single hop, no direction filter. Seeds without edges are not included in
/// `connected_node_ids`; callers union the seeds in themselves. An empty seed
/// set returns an empty neighborhood without calling the store.
#[instrument(skip(store, ctx, seed_ids), fields(trace_id = %ctx.trace_id(), seeds = seed_ids.len()))]
pub async fn expand(
    store: &Arc<dyn GraphStore>,
    ctx: &RequestContext,
    seed_ids: &HashSet<NodeId>,
) -> CoreResult<Neighborhood> {
    if seed_ids.is_empty() {
        return Ok(Neighborhood::default());
    }

    let edges = ctx
        .run("get_edges_touching", store.get_edges_touching(seed_ids))
        .await?;

    let connected_node_ids = edges
        .iter()
        .flat_map(|e| [e.from_node_id, e.to_node_id])
        .collect::<HashSet<_>>();

    debug!(
        edges = edges.len(),
        connected = connected_node_ids.len(),
        "Expanded neighborhood"
    );

    Ok(Neighborhood {
        connected_node_ids,
        edges,
    })
}

/// Depth-bounded breadth-first expansion.
///
/// Each level issues one `get_edges_touching` round-trip for the current
/// frontier. `depth == 1` yields the same result as [`expand`]; `depth == 0`
/// returns the seeds themselves with no edges. As with [`expand`], isolated
/// seeds are left to the caller when `depth > 0`.
#[instrument(skip(store, ctx, seed_ids), fields(trace_id = %ctx.trace_id(), seeds = seed_ids.len()))]
pub async fn expand_to_depth(
    store: &Arc<dyn GraphStore>,
    ctx: &RequestContext,
    seed_ids: &HashSet<NodeId>,
    depth: usize,
) -> CoreResult<Neighborhood> {
    if depth == 0 {
        return Ok(Neighborhood {
            connected_node_ids: seed_ids.clone(),
            edges: Vec::new(),
        });
    }

    let mut visited: HashSet<NodeId> = seed_ids.clone();
    let mut frontier: HashSet<NodeId> = seed_ids.clone();
    let mut connected: HashSet<NodeId> = HashSet::new();
    let mut edges = Vec::new();
    let mut seen_edges = HashSet::new();

    for level in 0..depth {
        if frontier.is_empty() {
            break;
        }

        let level_edges = ctx
            .run("get_edges_touching", store.get_edges_touching(&frontier))
            .await?;

        let mut next = HashSet::new();
        for edge in level_edges {
            for endpoint in [edge.from_node_id, edge.to_node_id] {
                connected.insert(endpoint);
                if visited.insert(endpoint) {
                    next.insert(endpoint);
                }
            }
            if seen_edges.insert(edge.id) {
                edges.push(edge);
            }
        }

        debug!(level, discovered = next.len(), "Expanded level");
        frontier = next;
    }

    Ok(Neighborhood {
        connected_node_ids: connected,
        edges,
    })
}
