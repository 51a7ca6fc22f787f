//! Ready-made graphs for tests.

use std::sync::Arc;

use antigravity_core::{
    seed_demo_graph, Category, DemoGraph, Edge, GraphStore, InMemoryGraphStore, NewNode, Node,
    NodeService, RelationType, RequestContext,
};
use antigravity_server::ServerConfig;

use crate::error::TestResult;

/// Server configuration backed by the in-memory store.
pub fn memory_config() -> ServerConfig {
    ServerConfig {
        bind_address: "127.0.0.1".to_string(),
        port: 0,
        database_url: "memory://".to_string(),
        ..ServerConfig::default()
    }
}

/// In-memory store holding the demo chain
/// Home → Plumbing → Radiator → Fix Leaking Radiator.
pub async fn demo_store() -> TestResult<(Arc<InMemoryGraphStore>, DemoGraph)> {
    let store = Arc::new(InMemoryGraphStore::new());
    let service = NodeService::new(store.clone());
    let demo = seed_demo_graph(&service, &RequestContext::new_root()).await?;
    Ok((store, demo))
}

/// The two-node example graph: `Home → Plumbing`, plus an unconnected
/// `Garden Shed` node.
#[derive(Debug, Clone)]
pub struct ExampleGraph {
    pub home: Node,
    pub plumbing: Node,
    pub shed: Node,
    pub edge: Edge,
}

pub async fn example_store() -> TestResult<(Arc<InMemoryGraphStore>, ExampleGraph)> {
    let store = Arc::new(InMemoryGraphStore::new());

    let home = store
        .create_node(NewNode::new("Home", Category::General))
        .await?;
    let plumbing = store
        .create_node(
            NewNode::new("Plumbing", Category::Plumbing)
                .with_summary("Pipes, taps and drains."),
        )
        .await?;
    let shed = store
        .create_node(
            NewNode::new("Garden Shed", Category::Garden)
                .with_summary("Build a small shed for tools."),
        )
        .await?;
    let edge = store
        .create_edge(&home.id, &plumbing.id, RelationType::Child)
        .await?;

    Ok((
        store,
        ExampleGraph {
            home,
            plumbing,
            shed,
            edge,
        },
    ))
}
