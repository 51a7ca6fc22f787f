//! How-to knowledge graph core: data model, store contract, search and
//! neighborhood expansion.

// Core modules
pub mod data;
pub mod services;
pub mod storage;

// Re-export key types for convenient usage
pub use data::context::{CancelHandle, CancelSignal, RequestContext};
pub use data::entities::{Edge, GraphSnapshot, Neighborhood, NewNode, Node};
pub use data::errors::{CoreError, CoreResult};
pub use data::identifiers::{EdgeId, NodeId};
pub use data::trace_context::TraceContext;
pub use data::types::{Category, RelationType, UnknownVariant};

// Re-export the store contract and its in-memory implementation
pub use storage::{GraphStore, InMemoryGraphStore};
#[cfg(any(test, feature = "mocks"))]
pub use storage::MockGraphStore;

// Re-export services
pub use services::{
    expand, expand_to_depth, seed_demo_graph, DemoGraph, NodeService, SearchService,
    DEFAULT_SEARCH_LIMIT,
};
