//! Services over the graph store

pub mod expander;
pub mod nodes;
pub mod search;
pub mod seed;

// Re-exports
pub use expander::{expand, expand_to_depth};
pub use nodes::NodeService;
pub use search::{SearchService, DEFAULT_SEARCH_LIMIT};
pub use seed::{demo_nodes, seed_demo_graph, DemoGraph};
