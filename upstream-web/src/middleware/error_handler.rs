use axum::{
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::errors::WebError;

/// Log server errors on the way out
pub async fn error_logging_middleware(request: Request<axum::body::Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;

    if response.status().is_server_error() {
        error!("Server error on {} {}: {}", method, uri, response.status());
    }

    response
}

/// Fallback for unknown routes
pub async fn handle_not_found() -> impl IntoResponse {
    WebError::not_found("no route matched")
}
