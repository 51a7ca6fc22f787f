//! API module for the Antigravity Server
//!
//! This module contains the routes and handlers of the HTTP surface.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod errors;
pub mod health;
pub mod nodes;
pub mod search;

use crate::server::GraphServer;

pub const ROOT_MESSAGE: &str = "Antigravity API is running";

/// Build the router for API endpoints
pub fn build_router(server: Arc<GraphServer>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health::health_check))
        .route("/search", get(search::search_handler))
        .route("/nodes/:id", get(nodes::get_node_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(server)
}

async fn root_handler() -> &'static str {
    ROOT_MESSAGE
}

pub use errors::ApiError;
