//! Mind map browsing model
//!
//! A query is turned into a base graph through a small mock taxonomy. User
//! edits (extra children, renames, side panel content) live in an
//! append-only [`GraphOverlay`] and are combined with the base by [`merge`].

pub mod content;
pub mod error;
pub mod graph;
pub mod overlay;
pub mod session;
pub mod taxonomy;

pub use content::{
    ai_placeholder, initial_content, CommentItem, ContentPatch, LinkItem, NodeContent, VideoItem,
};
pub use error::{MindMapError, MindMapResult};
pub use graph::{
    build_graph_from_query, capitalize_words, children_of, MindEdge, MindGraph, MindNode,
    ROOT_ID, ROOT_LABEL,
};
pub use overlay::{merge, GraphOverlay, DEFAULT_CHILD_LABEL};
pub use session::{MindMapSession, DEFAULT_QUERY};
pub use taxonomy::{Taxonomy, TaxonomyEntry, DEFAULT_BRANCHES};
