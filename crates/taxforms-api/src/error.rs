//! # Application Error
//!
//! Maps workflow errors to structured HTTP responses with proper
//! status codes and error bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use taxforms_workflow::WorkflowError;

/// Application-level error type that maps to HTTP responses.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested action conflicts with the form's current status.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        match &err {
            WorkflowError::NotFound(_) => AppError::NotFound(err.to_string()),
            WorkflowError::InvalidTransition(_) => AppError::Conflict(err.to_string()),
            WorkflowError::Store(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = serde_json::json!({
            "error": {
                "code": status.as_u16(),
                "message": self.to_string(),
            }
        });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxforms_core::{TaxFormStatus, TransitionError};

    #[test]
    fn test_not_found_maps_to_404() {
        let err = AppError::from(WorkflowError::NotFound(5));
        assert!(matches!(&err, AppError::NotFound(_)));
        assert_eq!(err.to_string(), "not found: no tax form found with id 5");
    }

    #[test]
    fn test_invalid_transition_maps_to_conflict() {
        let err = AppError::from(WorkflowError::InvalidTransition(TransitionError {
            current: TaxFormStatus::Returned,
            required: TaxFormStatus::Submitted,
        }));
        assert!(matches!(&err, AppError::Conflict(_)));
        assert_eq!(
            err.to_string(),
            "conflict: tax form is in RETURNED status, must be in SUBMITTED status"
        );
    }
}
