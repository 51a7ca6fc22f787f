//! End-to-end search tests over real HTTP.

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{json, Value};

use antigravity_core::GraphStore;
use antigravity_test_utils::{example_store, TestServer};

fn ids(snapshot: &Value, key: &str) -> HashSet<String> {
    snapshot[key]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_search_plumb_returns_home_and_plumbing() -> anyhow::Result<()> {
    let (store, graph) = example_store().await?;
    let server = TestServer::start(store).await?;

    let (status, snapshot) = server.client().search("plumb").await?;
    assert_eq!(status, StatusCode::OK);

    let expected: HashSet<String> = [graph.home.id.to_string(), graph.plumbing.id.to_string()]
        .into_iter()
        .collect();
    assert_eq!(ids(&snapshot, "nodes"), expected);
    assert_eq!(ids(&snapshot, "edges"), HashSet::from([graph.edge.id.to_string()]));
    assert_eq!(snapshot["path"], json!([graph.plumbing.id.to_string()]));

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn test_search_nonexistent_term_is_empty() -> anyhow::Result<()> {
    let (store, _) = example_store().await?;
    let server = TestServer::start(store).await?;

    let (status, snapshot) = server.client().search("nonexistent-term").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot, json!({"nodes": [], "edges": [], "path": []}));

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn test_search_isolated_node_returned_alone() -> anyhow::Result<()> {
    let (store, graph) = example_store().await?;
    let server = TestServer::start(store).await?;

    let (status, snapshot) = server.client().search("  SHED ").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&snapshot, "nodes"), HashSet::from([graph.shed.id.to_string()]));
    assert_eq!(snapshot["edges"], json!([]));
    assert_eq!(snapshot["path"], json!([graph.shed.id.to_string()]));

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn test_search_after_delete_drops_edges() -> anyhow::Result<()> {
    let (store, graph) = example_store().await?;
    let server = TestServer::start(store.clone()).await?;

    assert!(store.delete_node(&graph.home.id).await?);

    let (status, snapshot) = server.client().search("plumb").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&snapshot, "nodes"), HashSet::from([graph.plumbing.id.to_string()]));
    assert_eq!(snapshot["edges"], json!([]));

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn test_search_after_clear_is_empty() -> anyhow::Result<()> {
    let (store, _) = example_store().await?;
    let server = TestServer::start(store.clone()).await?;

    store.clear().await?;

    for query in ["home", "plumb", "shed"] {
        let (status, snapshot) = server.client().search(query).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(snapshot, json!({"nodes": [], "edges": [], "path": []}));
    }

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn test_concurrent_searches_agree() -> anyhow::Result<()> {
    let (store, _) = example_store().await?;
    let server = TestServer::start(store).await?;
    let client = server.client();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let client = client.clone();
        handles.push(tokio::spawn(async move { client.search("plumb").await }));
    }

    let mut results = Vec::new();
    for handle in handles {
        let (status, snapshot) = handle.await??;
        assert_eq!(status, StatusCode::OK);
        results.push((ids(&snapshot, "nodes"), ids(&snapshot, "edges")));
    }
    assert!(results.windows(2).all(|w| w[0] == w[1]));

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn test_search_missing_query_is_400() -> anyhow::Result<()> {
    let (store, _) = example_store().await?;
    let server = TestServer::start(store).await?;

    let (status, body) = server.client().get_json("/search?q=%20").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Query parameter q is required");

    server.stop().await;
    Ok(())
}
