//! Core data structures for the how-to knowledge graph

pub mod context;
pub mod entities;
pub mod errors;
pub mod identifiers;
pub mod trace_context;
pub mod types;

// Re-export all common types
pub use context::{CancelHandle, CancelSignal, RequestContext};
pub use entities::{Edge, GraphSnapshot, Neighborhood, NewNode, Node};
pub use errors::{CoreError, CoreResult};
pub use identifiers::{EdgeId, NodeId};
pub use trace_context::TraceContext;
pub use types::{Category, RelationType, UnknownVariant};
