//! Error taxonomy shared by the generation pipeline and the HTTP surface.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// JSON error body returned by every failing endpoint.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

/// Failures raised while turning a structured document into bytes.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("unsupported target format: {0}")]
    UnsupportedFormat(String),
    #[error("document serialization failed: {0}")]
    Serialization(String),
}

/// Failures raised by the object storage adapter.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage request failed: {0}")]
    Request(String),
    #[error("storage rejected the operation with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("storage returned a malformed response: {0}")]
    MalformedResponse(String),
}

/// Failures raised by the job/material repository.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Top-level error type returned by API handlers.
///
/// Each variant maps to a distinct HTTP status so callers can tell an
/// expired download apart from a missing one.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("missing or invalid credential")]
    Unauthenticated,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    NotReady(String),
    #[error("{0}")]
    Expired(String),
    #[error("document assembly failed: {0}")]
    Assembly(#[from] AssemblyError),
    #[error("storage operation failed: {0}")]
    Storage(#[from] StorageError),
    #[error("repository operation failed: {0}")]
    Repository(#[from] RepositoryError),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn error_type(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::Unauthenticated => "Unauthenticated",
            Self::NotFound(_) => "NotFound",
            Self::NotReady(_) => "NotReady",
            Self::Expired(_) => "Expired",
            Self::Assembly(_) => "AssemblyError",
            Self::Storage(_) => "StorageError",
            Self::Repository(_) | Self::Internal(_) => "InternalServerError",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::NotReady(_) => StatusCode::CONFLICT,
            Self::Expired(_) => StatusCode::GONE,
            Self::Assembly(_) | Self::Storage(_) | Self::Repository(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("request failed: {self}");
        }
        HttpResponse::build(self.status_code())
            .json(ErrorResponse::new(self.error_type(), &self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_status_per_kind() {
        assert_eq!(
            ApiError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::NotReady("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(ApiError::Expired("x".into()).status_code(), StatusCode::GONE);
        assert_eq!(
            ApiError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_expired_is_not_masked_as_not_found() {
        let expired = ApiError::Expired("download link expired".into());
        let missing = ApiError::NotFound("material not found".into());
        assert_ne!(expired.status_code(), missing.status_code());
        assert_ne!(expired.error_type(), missing.error_type());
    }

    #[test]
    fn test_error_response_body_shape() {
        let body = ErrorResponse::bad_request("subject must not be empty");
        assert_eq!(body.error, "BadRequest");
        assert!(!body.timestamp.is_empty());
    }
}
