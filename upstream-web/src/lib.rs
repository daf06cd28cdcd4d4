//! # Upstream Web Utilities
//!
//! Axum building blocks shared by the upstream mock server:
//!
//! - **Errors**: [`WebError`] with a plain-text [`IntoResponse`](axum::response::IntoResponse)
//! - **Middleware**: request ids and server error logging
//! - **Extractors**: delay headers and the lenient `limit` query

pub mod errors;
pub mod extractors;
pub mod middleware;

pub use errors::{WebError, WebResult};
pub use extractors::{
    DelayHeaders, LimitQuery, X_DELAY, X_DELAY_PERCENT, X_SLOWDOWN, X_SLOWDOWN_FROM,
};
pub use middleware::{
    error_logging_middleware, handle_not_found, request_id_middleware, RequestId,
    REQUEST_ID_HEADER,
};
