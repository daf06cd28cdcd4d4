//! Router setup

use axum::{
    middleware,
    routing::{any, get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use upstream_config::ServerConfig;
use upstream_web::{error_logging_middleware, handle_not_found, request_id_middleware};

use crate::{context::AppContext, handlers};

/// Middleware toggles
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Enable request ID tracking
    pub enable_request_id: bool,
    /// Enable request tracing
    pub enable_tracing: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            enable_request_id: true,
            enable_tracing: true,
        }
    }
}

impl From<&ServerConfig> for AppConfig {
    fn from(config: &ServerConfig) -> Self {
        Self {
            enable_request_id: config.enable_request_id,
            enable_tracing: config.enable_tracing,
        }
    }
}

/// Create the complete application
pub fn create_app(context: AppContext, config: AppConfig) -> Router {
    let mut app = Router::new()
        .route("/delay/{duration}", get(handlers::fixed_delay))
        .route("/json/{kind}", get(handlers::json_time))
        .route("/xml", get(handlers::xml_sample))
        .route("/soap", post(handlers::soap_stub))
        .route("/size/{size}", any(handlers::sized_payload))
        .route("/resource", get(handlers::list_resources))
        .route("/resource/", get(handlers::list_resources))
        .route("/resource/{id}", get(handlers::show_resource))
        .fallback(handle_not_found)
        .with_state(context);

    // Add middleware layers (applied in reverse order)
    if config.enable_request_id {
        app = app.layer(middleware::from_fn(request_id_middleware));
    }

    if config.enable_tracing {
        app = app.layer(TraceLayer::new_for_http());
    }

    app.layer(middleware::from_fn(error_logging_middleware))
}
