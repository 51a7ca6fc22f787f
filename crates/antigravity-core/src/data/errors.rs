//! Error types for the how-to knowledge graph

use thiserror::Error;

use crate::data::identifiers::NodeId;

/// Base error type for core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed caller input; never a server fault.
    #[error("Invalid input: {0}")]
    ValidationError(String),

    #[error("Entity not found: type={entity_type} id={id}")]
    NotFound { entity_type: String, id: String },

    #[error("Referential integrity violation: edge {from} -> {to} references missing node {missing}")]
    ReferentialIntegrity {
        from: NodeId,
        to: NodeId,
        missing: NodeId,
    },

    /// The backing storage is unavailable or failed.
    #[error("Store failure: {message}")]
    StoreFailure {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Operation cancelled: {operation} ({reason})")]
    Cancelled { operation: String, reason: String },

    #[error("Serialization/Deserialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Helper to create a store failure with an optional source error
    pub fn store_failure<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CoreError::StoreFailure {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// Helper to create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    pub fn cancelled(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::Cancelled {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error is the caller's fault rather than the system's.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CoreError::ValidationError(_)
                | CoreError::NotFound { .. }
                | CoreError::ReferentialIntegrity { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_display() {
        let error = CoreError::ValidationError("query must not be empty".into());
        assert_eq!(format!("{}", error), "Invalid input: query must not be empty");
    }

    #[test]
    fn test_not_found_error() {
        let error = CoreError::not_found("Node", "abc");

        match &error {
            CoreError::NotFound { entity_type, id } => {
                assert_eq!(entity_type, "Node");
                assert_eq!(id, "abc");
            }
            _ => panic!("Expected NotFound"),
        }
        assert!(error.is_client_error());
    }

    #[test]
    fn test_store_failure_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
        let error = CoreError::store_failure("Failed to fetch nodes", Some(io));

        assert_eq!(error.to_string(), "Store failure: Failed to fetch nodes");
        let source = std::error::Error::source(&error).expect("source should be kept");
        assert_eq!(source.to_string(), "connection reset");
        assert!(!error.is_client_error());
    }

    #[test]
    fn test_referential_integrity_names_missing_endpoint() {
        let from = NodeId::new_v4();
        let to = NodeId::new_v4();
        let error = CoreError::ReferentialIntegrity { from, to, missing: to };
        assert!(error.to_string().ends_with(&format!("missing node {}", to)));
    }
}
