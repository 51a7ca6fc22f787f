//! `GET /nodes/:id`

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use antigravity_core::{Node, NodeId};

use crate::api::errors::ApiError;
use crate::server::GraphServer;

pub const NODE_NOT_FOUND_MESSAGE: &str = "Node not found";

/// Node lookup handler. Ids that are not UUIDs cannot name a node, so they
/// answer 404 like any other unknown id.
pub async fn get_node_handler(
    State(server): State<Arc<GraphServer>>,
    Path(id): Path<String>,
) -> Result<Json<Node>, ApiError> {
    let node_id: NodeId = id
        .parse()
        .map_err(|_| ApiError::NotFound(NODE_NOT_FOUND_MESSAGE.to_string()))?;

    let ctx = server.request_context();
    let node = server
        .nodes()
        .get_node(&ctx, &node_id)
        .await
        .map_err(|err| ApiError::from_core(err, ctx.trace_id()))?;

    Ok(Json(node))
}
