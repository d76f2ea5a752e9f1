use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::domain::DomainError;

/// Errors surfaced to HTTP callers as a status plus a plain-text body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    BadRequest(String),

    #[error("Record not found")]
    NotFound,

    #[error("Database connection error")]
    Connection,

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid_json() -> Self {
        Self::BadRequest("Invalid JSON body".to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Connection | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Config(_) | DomainError::Connection(_) => Self::Connection,
            DomainError::InvalidInput(msg) => Self::BadRequest(msg),
            DomainError::NotFound(_) => Self::NotFound,
            DomainError::StorageError(msg) | DomainError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        tracing::warn!(status = %status, error_message = %message, "API error");

        (status, message).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_mapping() {
        let cases = [
            (DomainError::config("missing MONGO_URI"), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::connection("refused"), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::invalid_input("filter"), StatusCode::BAD_REQUEST),
            (DomainError::not_found("x"), StatusCode::NOT_FOUND),
            (DomainError::storage("insert failed"), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::internal("find timed out"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (domain, status) in cases {
            assert_eq!(ApiError::from(domain).status_code(), status);
        }
    }

    #[test]
    fn test_connection_failures_hide_details() {
        let err = ApiError::from(DomainError::config("missing MONGO_URI"));
        assert_eq!(err.to_string(), "Database connection error");
    }
}
