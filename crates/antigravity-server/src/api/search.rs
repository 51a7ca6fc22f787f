//! `GET /search?q=`

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;
use tracing::info;

use antigravity_core::GraphSnapshot;

use crate::api::errors::ApiError;
use crate::server::GraphServer;

pub const MISSING_QUERY_MESSAGE: &str = "Query parameter q is required";

/// Returns the value of `name` when it appears exactly once with a
/// non-blank value.
pub fn single_param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    let mut values = params
        .iter()
        .filter(|(key, _)| key == name)
        .map(|(_, value)| value.as_str());

    match (values.next(), values.next()) {
        (Some(value), None) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

/// Search handler
pub async fn search_handler(
    State(server): State<Arc<GraphServer>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<GraphSnapshot>, ApiError> {
    let query = single_param(&params, "q")
        .ok_or_else(|| ApiError::BadRequest(MISSING_QUERY_MESSAGE.to_string()))?;

    let ctx = server.request_context();
    let snapshot = server
        .search()
        .search_default(&ctx, query)
        .await
        .map_err(|err| ApiError::from_core(err, ctx.trace_id()))?;

    info!(
        trace_id = %ctx.trace_id(),
        nodes = snapshot.nodes.len(),
        edges = snapshot.edges.len(),
        "Search completed"
    );
    Ok(Json(snapshot))
}
