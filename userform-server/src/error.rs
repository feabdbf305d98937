//! API error type with IntoResponse
//!
//! Errors become the `{status: "error", ...}` envelope the original
//! clients expect: validation carries `errors`, storage failures carry
//! only the generic "Database error" label.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use userform_core::ServiceError;

/// API error with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(Vec<String>),

    /// No record matches the id (404)
    NotFound,

    /// Storage failure (500, cause logged, generic label returned)
    Storage(String),
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(errors) => Self::Validation(errors),
            ServiceError::NotFound => Self::NotFound,
            ServiceError::Storage(cause) => Self::Storage(cause.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "status": "error", "errors": errors }),
            ),
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "status": "error", "errors": ["User not found"] }),
            ),
            Self::Storage(cause) => {
                // Log the actual cause, return the generic label only.
                tracing::error!("database error: {cause}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "status": "error", "message": "Database error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn validation_error_is_400_with_error_list() {
        let err = ApiError::Validation(vec!["Invalid age".to_owned()]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "error");
        assert_eq!(body["errors"][0], "Invalid age");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn storage_error_is_500_with_generic_label() {
        let err = ApiError::Storage("connection refused".to_owned());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Database error");
        assert!(!body.to_string().contains("connection refused"));
    }
}
