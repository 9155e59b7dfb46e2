//! Error types for civinet.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // === Client Errors ===
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A listing filter was malformed (zero page, oversized limit, inverted
    /// date range). Rejected before any query reaches the store.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// A moderation or affiliation state change that the lifecycle does not
    /// permit (e.g. responding to an already-reviewed request).
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// A user attempted to open a second pending affiliation request.
    #[error("Duplicate request: {0}")]
    DuplicateRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // === Server Errors ===
    #[error("Database error: {0}")]
    Database(String),

    /// A store call exceeded the uniform deadline.
    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            // 4xx Client Errors
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) | Self::Validation(_) | Self::InvalidFilter(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidTransition(_) | Self::DuplicateRequest(_) | Self::Conflict(_) => {
                StatusCode::CONFLICT
            }

            // 5xx Server Errors
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Database(_) | Self::Config(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidFilter(_) => "INVALID_FILTER",
            Self::InvalidTransition(_) => "INVALID_TRANSITION",
            Self::DuplicateRequest(_) => "DUPLICATE_REQUEST",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns whether this error should be logged at error level.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        // Log server errors
        if self.is_server_error() {
            tracing::error!(error = %self, code = code, "Server error occurred");
        } else {
            tracing::debug!(error = %self, code = code, "Client error occurred");
        }

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

// === From implementations ===

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_status_codes() {
        assert_eq!(
            AppError::InvalidFilter("page must be >= 1".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidTransition("already reviewed".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::DuplicateRequest("pending request exists".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::NotFound("blog post".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_server_error_classification() {
        assert!(AppError::Database("connection reset".into()).is_server_error());
        assert!(AppError::Timeout("select blog_post".into()).is_server_error());
        assert!(!AppError::InvalidFilter("limit too large".into()).is_server_error());
    }

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(
            AppError::InvalidFilter(String::new()).error_code(),
            "INVALID_FILTER"
        );
        assert_eq!(
            AppError::DuplicateRequest(String::new()).error_code(),
            "DUPLICATE_REQUEST"
        );
        assert_eq!(AppError::Timeout(String::new()).error_code(), "TIMEOUT");
    }
}
