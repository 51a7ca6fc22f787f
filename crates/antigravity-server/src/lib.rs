//! Antigravity Server - HTTP surface of the how-to knowledge graph
//!
//! This module exports all the components of the Antigravity Server.

/// API module
pub mod api;

/// Server module
pub mod server;

/// Configuration module
pub mod config;

/// Error module
pub mod error;

/// Logging module
pub mod logging;

// Re-export key types
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{connect_store, GraphServer};

/// Run function
pub async fn run(config: ServerConfig) -> ServerResult<()> {
    // Create dependencies
    let store = connect_store(&config).await?;

    // Create and run server
    GraphServer::new(config, store).run().await
}
