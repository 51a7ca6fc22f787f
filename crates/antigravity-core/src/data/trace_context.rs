//! Trace ids carried by a request and the store calls it makes.

use tracing::{debug_span, Span};
use uuid::Uuid;

fn short_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// One request's trace id plus the span currently acting for it. Each store
/// round-trip gets a child span whose parent is the request's root span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    pub trace_id: String,
    pub span_id: String,
    pub parent_span_id: Option<String>,
}

impl TraceContext {
    pub fn new_root() -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string(),
            span_id: short_id(),
            parent_span_id: None,
        }
    }

    /// Span ids for one store call made on behalf of this context.
    pub fn child_span(&self) -> Self {
        Self {
            trace_id: self.trace_id.clone(),
            span_id: short_id(),
            parent_span_id: Some(self.span_id.clone()),
        }
    }

    /// `tracing` span tagged with these ids for the store call `operation`.
    pub fn store_span(&self, operation: &'static str) -> Span {
        debug_span!(
            "store_call",
            operation,
            trace_id = %self.trace_id,
            span_id = %self.span_id,
            parent_span_id = self.parent_span_id.as_deref().unwrap_or(""),
        )
    }
}

impl Default for TraceContext {
    fn default() -> Self {
        Self::new_root()
    }
}
