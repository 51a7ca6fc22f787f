//! Health check endpoint for the Antigravity Server

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::server::GraphServer;

/// Health check handler
///
/// Reports the server version and whether the graph store answers. Returns
/// 503 while the store is down.
pub async fn health_check(State(server): State<Arc<GraphServer>>) -> impl IntoResponse {
    debug!("Health check requested");

    let ctx = server.request_context();
    let graph_store_status = match server.nodes().health_check(&ctx).await {
        Ok(true) => "UP",
        Ok(false) => "DOWN",
        Err(err) => {
            warn!(trace_id = %ctx.trace_id(), "Graph store health check failed: {}", err);
            "DOWN"
        }
    };

    let (status_code, overall) = if graph_store_status == "UP" {
        (StatusCode::OK, "UP")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "DOWN")
    };

    let response = json!({
        "status": overall,
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "graphStore": { "status": graph_store_status },
        },
    });

    (status_code, Json(response))
}
