//! End-to-end tests for node lookup, health and the root banner.

use pretty_assertions::assert_eq;
use reqwest::StatusCode;

use antigravity_core::NodeId;
use antigravity_test_utils::{demo_store, TestServer};

#[tokio::test]
async fn test_root_banner() -> anyhow::Result<()> {
    let (store, _) = demo_store().await?;
    let server = TestServer::start(store).await?;

    let (status, body) = server.client().get_text("/").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Antigravity API is running");

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn test_get_demo_node() -> anyhow::Result<()> {
    let (store, demo) = demo_store().await?;
    let server = TestServer::start(store).await?;

    let path = format!("/nodes/{}", demo.leaking_radiator.id);
    let (status, node) = server.client().get_json(&path).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(node["id"], demo.leaking_radiator.id.to_string());
    assert_eq!(node["timeEstimate"], "1 hour");
    assert_eq!(node["costEstimate"], "200 DKK");
    assert_eq!(node["tools"].as_array().map(Vec::len), Some(3));

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn test_unknown_node_is_404() -> anyhow::Result<()> {
    let (store, _) = demo_store().await?;
    let server = TestServer::start(store).await?;

    let (status, body) = server
        .client()
        .get_json(&format!("/nodes/{}", NodeId::new_v4()))
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Node not found");

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn test_health_is_up() -> anyhow::Result<()> {
    let (store, _) = demo_store().await?;
    let server = TestServer::start(store).await?;

    let (status, body) = server.client().get_json("/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "UP");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    server.stop().await;
    Ok(())
}
