//! Centralized API error handling
//!
//! A single error type maps every failure kind to an HTTP status code and the
//! JSON envelope used across the API: `{success, message, error?, errors?}`.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::validation::FieldErrors;

/// API error type with HTTP status code mapping
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// JSON error envelope
#[derive(Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ApiError {
    /// Get the HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the response body for this error
    pub fn body(&self) -> ErrorBody {
        match self {
            ApiError::NotFound(message) => ErrorBody {
                success: false,
                message: message.clone(),
                error: None,
                errors: None,
            },
            ApiError::Validation(fields) => ErrorBody {
                success: false,
                message: "Validation failed".to_string(),
                error: None,
                errors: Some(fields.as_map().clone()),
            },
            ApiError::Database(detail) => ErrorBody {
                success: false,
                message: "A database error occurred".to_string(),
                error: Some(detail.clone()),
                errors: None,
            },
            ApiError::Internal(detail) => ErrorBody {
                success: false,
                message: "An unexpected error occurred".to_string(),
                error: Some(detail.clone()),
                errors: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            ApiError::Database(detail) | ApiError::Internal(detail) => {
                tracing::error!(error = %detail, status = %status.as_u16(), "Server error occurred");
            }
            _ => {
                tracing::debug!(error = %self, status = %status.as_u16(), "Client error occurred");
            }
        }

        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::NotFound("test".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Validation(FieldErrors::default()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Database("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Internal("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_body_carries_message() {
        let err = ApiError::NotFound("User with ID 42 not found".to_string());
        let body = err.body();
        assert!(!body.success);
        assert_eq!(body.message, "User with ID 42 not found");
        assert!(body.error.is_none());
        assert!(body.errors.is_none());
    }

    #[test]
    fn test_validation_body_lists_fields() {
        let mut fields = FieldErrors::default();
        fields.push("age", "The age must be at least 0.");
        let body = ApiError::Validation(fields).body();

        assert!(!body.success);
        let errors = body.errors.unwrap();
        assert_eq!(errors["age"], vec!["The age must be at least 0."]);
    }

    #[test]
    fn test_database_body_has_diagnostic() {
        let body = ApiError::Database("duplicate key value".to_string()).body();
        assert!(!body.success);
        assert_eq!(body.error.as_deref(), Some("duplicate key value"));
    }
}
