//! Shared API types
//!
//! Error responses and the envelopes every planets endpoint answers with.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::criteria::CriteriaError;

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn from_data(e: crate::data::DataError) -> Self {
        tracing::error!(error = %e, backend = e.backend(), "Data error");
        Self::internal("Database operation failed")
    }
}

impl From<CriteriaError> for ApiError {
    fn from(e: CriteriaError) -> Self {
        tracing::debug!(key = e.key(), error = %e, "Rejected criteria");
        Self::bad_request("INVALID_CRITERIA", e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "INTERNAL".to_string(),
                message,
            ),
        };
        (
            status,
            Json(ErrorBody {
                error: error_type,
                code,
                message,
            }),
        )
            .into_response()
    }
}

/// Body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// `bad_request`, `not_found` or `internal_error`
    #[schema(value_type = String)]
    pub error: &'static str,
    pub code: String,
    pub message: String,
}

/// `{message}` envelope for mutations without a payload
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let response = ApiError::not_found("PLANET_NOT_FOUND", "Planet not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["code"], "PLANET_NOT_FOUND");
        assert_eq!(body["message"], "Planet not found");
    }

    #[tokio::test]
    async fn test_internal_hides_details() {
        let err = crate::data::DataError::MigrationFailed {
            backend: "sqlite",
            version: 9,
            name: "x".to_string(),
            error: "secret detail".to_string(),
        };
        let response = ApiError::from_data(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "internal_error");
        assert_eq!(body["message"], "Database operation failed");
    }

    #[tokio::test]
    async fn test_criteria_error_is_bad_request() {
        let err = CriteriaError::InvalidSort {
            value: "name; DROP".to_string(),
        };
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["code"], "INVALID_CRITERIA");
        assert!(body["message"].as_str().unwrap().contains("name; DROP"));
    }
}
