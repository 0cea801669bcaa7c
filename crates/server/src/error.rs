//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`; responses are JSON `{"error": "..."}` bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::orders::OrderPlacementError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database or data-integrity failure (not caused by the caller).
    #[error("Database error: {0}")]
    Repository(RepositoryError),

    /// Referenced entity absent.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request payload failed validation before any mutation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Mutation blocked by a referential dependency or duplicate.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Caller lacks the role for the action.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => Self::NotFound("resource not found".to_owned()),
            RepositoryError::Conflict(msg) => Self::Conflict(msg),
            other => Self::Repository(other),
        }
    }
}

impl From<OrderPlacementError> for AppError {
    fn from(e: OrderPlacementError) -> Self {
        match e {
            OrderPlacementError::CartNotFound => {
                Self::NotFound("no cart with the given id exists".to_owned())
            }
            OrderPlacementError::EmptyCart => Self::Validation("the cart is empty".to_owned()),
            OrderPlacementError::Repository(repo) => Self::from(repo),
            OrderPlacementError::Database(db) => Self::Repository(RepositoryError::Database(db)),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Repository(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Repository(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        };

        // Don't expose internal error details to clients
        let message = match self {
            Self::Repository(_) | Self::Internal(_) => "internal server error".to_owned(),
            Self::NotFound(msg)
            | Self::Validation(msg)
            | Self::Conflict(msg)
            | Self::Unauthorized(msg)
            | Self::Forbidden(msg) => msg,
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product 123".to_owned());
        assert_eq!(err.to_string(), "Not found: product 123");

        let err = AppError::Validation("the cart is empty".to_owned());
        assert_eq!(err.to_string(), "Validation error: the cart is empty");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            status_of(AppError::NotFound("x".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Validation("x".to_owned())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(AppError::Conflict("x".to_owned())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Unauthorized("x".to_owned())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Forbidden("x".to_owned())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(AppError::Internal("x".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_repository_error_mapping() {
        assert!(matches!(
            AppError::from(RepositoryError::NotFound),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(RepositoryError::Conflict("dup".to_owned())),
            AppError::Conflict(_)
        ));
        assert!(matches!(
            AppError::from(RepositoryError::DataCorruption("bad".to_owned())),
            AppError::Repository(_)
        ));
    }

    #[test]
    fn test_order_placement_error_mapping() {
        assert_eq!(
            status_of(AppError::from(OrderPlacementError::CartNotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::from(OrderPlacementError::EmptyCart)),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
