use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{self, Body},
    http::{self, Request, StatusCode},
};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tower::ServiceExt;

use antigravity_core::{
    seed_demo_graph, CoreError, CoreResult, DemoGraph, Edge, GraphStore, InMemoryGraphStore,
    MockGraphStore, NewNode, Node, NodeId, NodeService, RelationType, RequestContext,
};
use antigravity_server::{api::build_router, GraphServer, ServerConfig};

struct TestContext {
    server: Arc<GraphServer>,
    demo: DemoGraph,
}

fn test_config() -> ServerConfig {
    ServerConfig {
        database_url: "memory://".to_string(),
        ..ServerConfig::default()
    }
}

// Helper to set up a server over the seeded demo graph
async fn setup_test() -> TestContext {
    let store: Arc<dyn GraphStore> = Arc::new(InMemoryGraphStore::new());
    let demo = seed_demo_graph(&NodeService::new(store.clone()), &RequestContext::new_root())
        .await
        .unwrap();

    TestContext {
        server: Arc::new(GraphServer::new(test_config(), store)),
        demo,
    }
}

// Helper to make HTTP requests against the router
async fn make_request(server: &Arc<GraphServer>, path: &str) -> (StatusCode, String) {
    let req = Request::builder()
        .uri(path)
        .method(http::Method::GET)
        .body(Body::empty())
        .unwrap();

    let app = build_router(server.clone());
    let response = app.oneshot(req).await.unwrap();

    let status = response.status();
    let body = body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let body_str = String::from_utf8(body.to_vec()).unwrap_or_default();

    (status, body_str)
}

async fn get_json(server: &Arc<GraphServer>, path: &str) -> (StatusCode, Value) {
    let (status, body) = make_request(server, path).await;
    (status, serde_json::from_str(&body).unwrap())
}

fn ids(values: &Value, key: &str) -> HashSet<String> {
    values[key]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_root_endpoint() {
    let ctx = setup_test().await;

    let (status, body) = make_request(&ctx.server, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Antigravity API is running");
}

#[tokio::test]
async fn test_health_endpoint() {
    let ctx = setup_test().await;

    let (status, response) = get_json(&ctx.server, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "UP");
    assert_eq!(response["dependencies"]["graphStore"]["status"], "UP");
}

#[tokio::test]
async fn test_health_reports_store_down() {
    let mut mock = MockGraphStore::new();
    mock.expect_health_check().returning(|| Ok(false));
    let server = Arc::new(GraphServer::new(test_config(), Arc::new(mock)));

    let (status, response) = get_json(&server, "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response["status"], "DOWN");
    assert_eq!(response["dependencies"]["graphStore"]["status"], "DOWN");
}

#[tokio::test]
async fn test_search_returns_neighborhood() {
    let ctx = setup_test().await;

    let (status, snapshot) = get_json(&ctx.server, "/search?q=home").await;
    assert_eq!(status, StatusCode::OK);

    let expected: HashSet<String> = [ctx.demo.home.id, ctx.demo.plumbing.id]
        .iter()
        .map(|id| id.to_string())
        .collect();
    assert_eq!(ids(&snapshot, "nodes"), expected);
    assert_eq!(snapshot["edges"].as_array().unwrap().len(), 1);
    assert_eq!(snapshot["edges"][0]["fromNodeId"], ctx.demo.home.id.to_string());
    assert_eq!(snapshot["edges"][0]["relationType"], "CHILD");
    assert_eq!(snapshot["path"][0], ctx.demo.home.id.to_string());
}

#[tokio::test]
async fn test_search_edges_are_closed_over_nodes() {
    let ctx = setup_test().await;

    let (status, snapshot) = get_json(&ctx.server, "/search?q=radiator").await;
    assert_eq!(status, StatusCode::OK);

    let node_ids = ids(&snapshot, "nodes");
    for edge in snapshot["edges"].as_array().unwrap() {
        assert!(node_ids.contains(edge["fromNodeId"].as_str().unwrap()));
        assert!(node_ids.contains(edge["toNodeId"].as_str().unwrap()));
    }
    // Radiator, its parent and its child
    assert_eq!(node_ids.len(), 3);
}

#[tokio::test]
async fn test_search_without_matches_is_empty() {
    let ctx = setup_test().await;

    let (status, snapshot) = get_json(&ctx.server, "/search?q=quantum").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        snapshot,
        serde_json::json!({"nodes": [], "edges": [], "path": []})
    );
}

#[tokio::test]
async fn test_search_requires_single_query() {
    let ctx = setup_test().await;

    for path in ["/search", "/search?q=", "/search?q=%20%20", "/search?q=a&q=b"] {
        let (status, response) = get_json(&ctx.server, path).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", path);
        assert_eq!(response["error"], "Query parameter q is required");
        assert_eq!(response["errorDetails"]["errorCode"], "ERR_BAD_REQUEST");
    }
}

#[tokio::test]
async fn test_search_store_failure_is_500() {
    let mut mock = MockGraphStore::new();
    mock.expect_find_matching_nodes().returning(|_, _| {
        Err(CoreError::store_failure::<std::io::Error>(
            "connection refused",
            None,
        ))
    });
    let server = Arc::new(GraphServer::new(test_config(), Arc::new(mock)));

    let (status, response) = get_json(&server, "/search?q=leak").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response["error"], "Internal server error");
}

#[tokio::test]
async fn test_get_node() {
    let ctx = setup_test().await;
    let path = format!("/nodes/{}", ctx.demo.leaking_radiator.id);

    let (status, node) = get_json(&ctx.server, &path).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(node["title"], "Fix Leaking Radiator");
    assert_eq!(node["category"], "PLUMBING");
    assert_eq!(node["difficulty"], 3);
    assert!(node["commonMistakes"].is_array());
}

#[tokio::test]
async fn test_get_node_not_found() {
    let ctx = setup_test().await;

    let missing = format!("/nodes/{}", NodeId::new_v4());
    for path in [missing.as_str(), "/nodes/not-a-uuid"] {
        let (status, response) = get_json(&ctx.server, path).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", path);
        assert_eq!(response["error"], "Node not found");
    }
}

#[tokio::test]
async fn test_get_node_store_failure_is_500() {
    let mut mock = MockGraphStore::new();
    mock.expect_get_node().returning(|_| {
        Err(CoreError::store_failure::<std::io::Error>("pool timed out", None))
    });
    let server = Arc::new(GraphServer::new(test_config(), Arc::new(mock)));

    let (status, _) = get_json(&server, &format!("/nodes/{}", NodeId::new_v4())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

/// Store whose seed lookup outlives any reasonable timeout.
struct StalledStore;

#[async_trait::async_trait]
impl GraphStore for StalledStore {
    async fn create_node(&self, _node: NewNode) -> CoreResult<Node> {
        unimplemented!()
    }
    async fn get_node(&self, _id: &NodeId) -> CoreResult<Option<Node>> {
        Ok(None)
    }
    async fn get_nodes_by_ids(&self, _ids: &HashSet<NodeId>) -> CoreResult<Vec<Node>> {
        Ok(Vec::new())
    }
    async fn find_matching_nodes(&self, _needle: &str, _limit: usize) -> CoreResult<Vec<Node>> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Vec::new())
    }
    async fn create_edge(
        &self,
        _from: &NodeId,
        _to: &NodeId,
        _relation_type: RelationType,
    ) -> CoreResult<Edge> {
        unimplemented!()
    }
    async fn get_edges_touching(&self, _ids: &HashSet<NodeId>) -> CoreResult<Vec<Edge>> {
        Ok(Vec::new())
    }
    async fn delete_node(&self, _id: &NodeId) -> CoreResult<bool> {
        Ok(false)
    }
    async fn clear(&self) -> CoreResult<()> {
        Ok(())
    }
    async fn health_check(&self) -> CoreResult<bool> {
        Ok(true)
    }
}

#[tokio::test]
async fn test_search_timeout_is_503() {
    let config = ServerConfig {
        store_timeout_ms: Some(20),
        ..test_config()
    };
    let server = Arc::new(GraphServer::new(config, Arc::new(StalledStore)));

    let (status, response) = get_json(&server, "/search?q=radiator").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response["error"], "Request cancelled");
}

#[tokio::test]
async fn test_search_respects_configured_limit() {
    let store = Arc::new(InMemoryGraphStore::new());
    for i in 0..4 {
        store
            .create_node(NewNode::new(
                format!("Pipe job {}", i),
                antigravity_core::Category::Plumbing,
            ))
            .await
            .unwrap();
    }
    let config = ServerConfig {
        search_result_limit: 2,
        ..test_config()
    };
    let server = Arc::new(GraphServer::new(config, store));

    let (status, snapshot) = get_json(&server, "/search?q=pipe").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["nodes"].as_array().unwrap().len(), 2);
}
