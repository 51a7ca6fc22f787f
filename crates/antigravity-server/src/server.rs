//! Main Antigravity server implementation

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use antigravity_core::{
    seed_demo_graph, GraphStore, InMemoryGraphStore, NodeService, RequestContext, SearchService,
};
use antigravity_state_postgres::PostgresGraphStore;

use crate::config::ServerConfig;
use crate::error::ServerResult;

/// Shared state behind every HTTP handler
#[derive(Clone)]
pub struct GraphServer {
    /// Configuration
    pub config: ServerConfig,

    search: SearchService,

    nodes: NodeService,
}

/// Manual Debug implementation that doesn't try to debug the trait objects
impl std::fmt::Debug for GraphServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphServer")
            .field("config", &self.config)
            .field("search_limit", &self.search.default_limit())
            .finish()
    }
}

impl GraphServer {
    /// Create a new GraphServer over an already connected store
    pub fn new(config: ServerConfig, store: Arc<dyn GraphStore>) -> Self {
        let search =
            SearchService::new(store.clone()).with_default_limit(config.search_result_limit);
        let nodes = NodeService::new(store);
        Self {
            config,
            search,
            nodes,
        }
    }

    pub fn search(&self) -> &SearchService {
        &self.search
    }

    pub fn nodes(&self) -> &NodeService {
        &self.nodes
    }

    /// Fresh per-request context carrying the configured store timeout.
    pub fn request_context(&self) -> RequestContext {
        let ctx = RequestContext::new_root();
        match self.config.store_timeout() {
            Some(timeout) => ctx.with_store_timeout(timeout),
            None => ctx,
        }
    }

    /// Replaces the stored graph with the demo content.
    pub async fn seed_demo_data(&self) -> ServerResult<()> {
        let ctx = self.request_context();
        let demo = seed_demo_graph(&self.nodes, &ctx).await?;
        info!(
            nodes = demo.nodes().len(),
            edges = demo.edges.len(),
            "Seeded demo graph"
        );
        Ok(())
    }

    /// Run the server on the configured address until Ctrl-C
    pub async fn run(self) -> ServerResult<()> {
        info!("Starting Antigravity Server");

        if self.config.seed_demo_data {
            self.seed_demo_data().await?;
        }

        let addr = self.config.socket_addr()?;
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<S>(self, listener: TcpListener, shutdown: S) -> ServerResult<()>
    where
        S: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        info!("Listening on {}", addr);

        let app = crate::api::build_router(Arc::new(self));
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

/// Picks the store named by `DATABASE_URL`.
pub async fn connect_store(config: &ServerConfig) -> ServerResult<Arc<dyn GraphStore>> {
    if config.uses_memory_store() {
        info!("Using in-memory graph store");
        return Ok(Arc::new(InMemoryGraphStore::new()));
    }

    info!(
        max_connections = config.database_max_connections,
        "Using PostgreSQL graph store"
    );
    let store = PostgresGraphStore::connect(&config.postgres_config()).await?;
    Ok(Arc::new(store))
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
