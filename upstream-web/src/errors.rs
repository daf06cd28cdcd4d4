//! Web-specific error types and conversions
//!
//! Responses are plain text: mock clients compare status codes and bodies
//! byte for byte, so there is no JSON envelope.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use upstream_core::CoreError;

/// Body written for every 404
pub const NOT_FOUND_BODY: &str = "Not Found";

/// Web-specific error type for HTTP handlers
#[derive(Debug, Error)]
pub enum WebError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

/// Result type for web operations
pub type WebResult<T> = Result<T, WebError>;

impl WebError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            WebError::NotFound { .. } => StatusCode::NOT_FOUND,
            WebError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        WebError::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        WebError::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        WebError::Internal {
            message: message.into(),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            WebError::BadRequest { message } => message,
            WebError::NotFound { message } => {
                tracing::debug!("Responding 404: {}", message);
                NOT_FOUND_BODY.to_string()
            }
            // Internal details stay in the logs
            WebError::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                "Internal Server Error".to_string()
            }
        };

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}

impl From<CoreError> for WebError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InvalidFormat { .. } => WebError::bad_request(error.to_string()),
            CoreError::NotFound { .. } => WebError::not_found(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use upstream_core::FormatKind;

    async fn body_text(error: WebError) -> (StatusCode, String) {
        let response = error.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(WebError::bad_request("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(WebError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            WebError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_not_found_body_is_fixed() {
        let (status, body) = body_text(CoreError::not_found(150).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Not Found");
    }

    #[tokio::test]
    async fn test_invalid_format_becomes_bad_request() {
        let error: WebError =
            CoreError::invalid_format(FormatKind::Size, "bogus", "unrecognized size").into();
        let (status, body) = body_text(error).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid size 'bogus': unrecognized size");
    }

    #[tokio::test]
    async fn test_internal_hides_details() {
        let (status, body) = body_text(WebError::internal("disk on fire")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("disk"));
    }
}
