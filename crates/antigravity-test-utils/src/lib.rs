//! Testing utilities for the Antigravity knowledge graph.
//!
//! Fixture graphs over the in-memory store and a [`TestServer`] running the
//! real router on an ephemeral port, with a small reqwest [`TestClient`].

pub mod client;
pub mod error;
pub mod fixtures;
pub mod server;

pub use client::TestClient;
pub use error::{TestError, TestResult};
pub use fixtures::{demo_store, example_store, memory_config, ExampleGraph};
pub use server::TestServer;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_example_store_shape() {
        let (store, graph) = example_store().await.unwrap();
        assert_eq!(store.counts().await, (3, 1));
        assert_eq!(graph.edge.from_node_id, graph.home.id);
        assert_eq!(graph.edge.to_node_id, graph.plumbing.id);
    }

    #[tokio::test]
    async fn test_server_starts_and_stops() {
        let (store, _) = demo_store().await.unwrap();
        let server = TestServer::start(store).await.unwrap();

        let (status, body) = server.client().get_text("/").await.unwrap();
        assert_eq!(status, reqwest::StatusCode::OK);
        assert_eq!(body, "Antigravity API is running");

        server.stop().await;
    }
}
