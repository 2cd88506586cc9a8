//! # API Errors
//!
//! The uniform error surface. Every failure terminates the request with a
//! single JSON body of shape `{"error": ...}`; clients see exactly two
//! messages, malformed identifiers versus undifferentiated store failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event};
use crate::store::StoreError;

/// Result type for request handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Client-visible API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Path identifier is not a well-formed 24-character hex id.
    /// Detected before any store call.
    #[error("Wrong id")]
    WrongId,

    /// A store operation failed. Detail is logged, never returned.
    #[error("Something went wrong...")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::WrongId => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::WrongId => {
                log_event_with_fields(Event::RequestRejected, &[("reason", "wrong_id")]);
            }
            ApiError::Store(err) => {
                let detail = err.to_string();
                log_event_with_fields(Event::StoreOpFailed, &[("detail", detail.as_str())]);
            }
        }

        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::WrongId.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Store(StoreError::Operation("boom".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_messages_are_fixed() {
        assert_eq!(ApiError::WrongId.to_string(), "Wrong id");

        // Store detail never leaks into the client message
        let err = ApiError::Store(StoreError::Operation("lock poisoned".to_string()));
        assert_eq!(err.to_string(), "Something went wrong...");
    }

    #[test]
    fn test_error_body_shape() {
        let body = ErrorResponse::from(&ApiError::WrongId);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Wrong id"}));
    }

    #[test]
    fn test_store_error_conversion() {
        let err: ApiError = StoreError::Operation("boom".to_string()).into();
        assert!(matches!(err, ApiError::Store(_)));
    }
}
