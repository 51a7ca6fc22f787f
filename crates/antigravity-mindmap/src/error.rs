use thiserror::Error;

/// All possible errors from mind map edits
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MindMapError {
    /// No node with this id in the base graph or the overlay
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    /// Base nodes keep their derived labels
    #[error("Node {0} is derived from the query and cannot be renamed")]
    NotRenameable(String),

    /// A user-added node's label must contain something besides whitespace
    #[error("Label for node {0} is blank")]
    BlankLabel(String),

    /// A link, comment or video failed validation
    #[error("Invalid content: {0}")]
    InvalidContent(String),

    /// A taxonomy entry needs at least one path label
    #[error("Taxonomy entry '{0}' has an empty path")]
    EmptyPath(String),

    /// A taxonomy entry needs a non-blank key to match queries against
    #[error("Taxonomy entry has an empty key")]
    EmptyKey,
}

pub type MindMapResult<T> = Result<T, MindMapError>;
