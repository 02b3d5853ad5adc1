//! Error envelope returned by every endpoint

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::DomainError;

const UNEXPECTED_MESSAGE: &str = "Ha ocurrido un error inesperado";

/// Error body: `{ "success": false, "error": "<kind>", "message": "..." }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                success: false,
                error: kind.into(),
                message: message.into(),
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "validation_error", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "forbidden", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "conflict", message)
    }

    /// Internal error; the detail is logged, never returned
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        error!(error = %detail, "Unexpected error while handling request");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            UNEXPECTED_MESSAGE,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let status = match &err {
            DomainError::Validation { .. } | DomainError::InvalidId { .. } => {
                StatusCode::BAD_REQUEST
            }
            DomainError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            DomainError::Forbidden { .. } => StatusCode::FORBIDDEN,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Conflict { .. } => StatusCode::CONFLICT,
            DomainError::Storage { .. }
            | DomainError::Configuration { .. }
            | DomainError::Internal { .. } => {
                error!(kind = err.kind(), error = %err, "Unexpected error while handling request");
                return Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.kind(), UNEXPECTED_MESSAGE);
            }
        };

        Self::new(status, err.kind(), err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.response.error, self.response.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_status_mapping() {
        let cases = [
            (DomainError::validation("x"), StatusCode::BAD_REQUEST),
            (DomainError::invalid_id("x"), StatusCode::BAD_REQUEST),
            (DomainError::unauthorized("x"), StatusCode::UNAUTHORIZED),
            (DomainError::forbidden("x"), StatusCode::FORBIDDEN),
            (DomainError::not_found("x"), StatusCode::NOT_FOUND),
            (DomainError::conflict("x"), StatusCode::CONFLICT),
            (DomainError::storage("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::configuration("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn test_conflict_keeps_message() {
        let err = ApiError::from(DomainError::conflict(
            "Ya existe un cliente con el email ana@acme.com",
        ));

        assert!(!err.response.success);
        assert_eq!(err.response.error, "conflict");
        assert_eq!(
            err.response.message,
            "Ya existe un cliente con el email ana@acme.com"
        );
    }

    #[test]
    fn test_unexpected_errors_hide_details() {
        let err = ApiError::from(DomainError::storage("connection refused on 10.0.0.3"));

        assert_eq!(err.response.error, "storage_error");
        assert_eq!(err.response.message, UNEXPECTED_MESSAGE);
        assert!(!err.to_string().contains("10.0.0.3"));
    }

    #[test]
    fn test_error_serialization() {
        let err = ApiError::unauthorized("Token inválido o expirado");
        let json = serde_json::to_value(&err.response).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "unauthorized");
        assert_eq!(json["message"], "Token inválido o expirado");
    }
}
