//! Mutation result type.
//!
//! Listing operations propagate failures as [`AppError`]; mutations do not.
//! Every write operation resolves to a [`MutationOutcome`] so calling UI
//! code can render inline failure state without exception handling.

use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult};

/// The result of a write operation. Never thrown across a service boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationOutcome {
    /// Whether the mutation was applied.
    pub success: bool,
    /// Failure message, present only when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MutationOutcome {
    /// A successful mutation.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// A failed mutation with a caller-facing message.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }

    /// Collapse a fallible internal step into the public result shape.
    #[must_use]
    pub fn from_result(result: AppResult<()>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(err) => err.into(),
        }
    }
}

impl From<AppError> for MutationOutcome {
    fn from(err: AppError) -> Self {
        Self::failed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_has_no_error() {
        let outcome = MutationOutcome::ok();
        assert!(outcome.success);
        assert!(outcome.error.is_none());
    }

    #[test]
    fn test_from_result_maps_error_message() {
        let outcome =
            MutationOutcome::from_result(Err(AppError::NotFound("blog post x".to_string())));
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("Not found: blog post x"));
    }
}
