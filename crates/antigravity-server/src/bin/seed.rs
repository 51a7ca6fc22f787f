//! Replaces the contents of the configured graph store with the demo graph.

use anyhow::{Context, Result};
use tracing::info;

use antigravity_core::{seed_demo_graph, NodeService, RequestContext};
use antigravity_server::{connect_store, logging, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    logging::init_from_env().context("Failed to initialize logging")?;

    let config = ServerConfig::load().context("Failed to load configuration")?;
    let store = connect_store(&config)
        .await
        .context("Failed to connect to graph store")?;

    let service = NodeService::new(store);
    let ctx = RequestContext::new_root();
    let demo = seed_demo_graph(&service, &ctx)
        .await
        .context("Failed to seed demo graph")?;

    for node in demo.nodes() {
        info!(id = %node.id, title = %node.title, "Created node");
    }
    info!(edges = demo.edges.len(), "Seeding complete");

    Ok(())
}
