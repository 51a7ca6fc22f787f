//! Error handling for the Antigravity API
//!
//! Every failure leaves the server as
//! `{"error": msg, "errorDetails": {"errorCode", "errorMessage"}}`.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::{error, warn};

use antigravity_core::CoreError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const CANCELLED_MESSAGE: &str = "Request cancelled";

/// API Error type for returning standard error responses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),
    /// Not found (404)
    NotFound(String),
    /// Conflict (409)
    Conflict(String),
    /// Internal server error (500)
    InternalServerError(String),
    /// Service unavailable (503)
    ServiceUnavailable(String),
}

impl ApiError {
    /// Maps a core failure to its HTTP form. Server faults are logged here
    /// with the request's trace id and their detail stays out of the body.
    pub fn from_core(err: CoreError, trace_id: &str) -> Self {
        match err {
            CoreError::ValidationError(msg) => ApiError::BadRequest(msg),
            CoreError::NotFound { entity_type, .. } => {
                ApiError::NotFound(format!("{} not found", entity_type))
            }
            err @ CoreError::ReferentialIntegrity { .. } => ApiError::Conflict(err.to_string()),
            CoreError::Cancelled { operation, reason } => {
                warn!(%trace_id, %operation, %reason, "Request cancelled");
                ApiError::ServiceUnavailable(CANCELLED_MESSAGE.to_string())
            }
            err @ (CoreError::StoreFailure { .. } | CoreError::SerializationError(_)) => {
                error!(%trace_id, error = ?err, "Request failed: {}", err);
                ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "ERR_BAD_REQUEST",
            ApiError::NotFound(_) => "ERR_NOT_FOUND",
            ApiError::Conflict(_) => "ERR_CONFLICT",
            ApiError::InternalServerError(_) => "ERR_INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "ERR_SERVICE_UNAVAILABLE",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::InternalServerError(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message(), self.status())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = Json(json!({
            "error": self.message(),
            "errorDetails": {
                "errorCode": self.code(),
                "errorMessage": self.message(),
            }
        }));

        (self.status(), body).into_response()
    }
}
