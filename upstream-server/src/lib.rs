//! Configurable mock upstream server
//!
//! Canned endpoints for exercising HTTP clients, proxies and load generators:
//! JSON (valid or deliberately broken), XML, random payloads of any size and a
//! small paginated resource collection. Every shaped endpoint honours the
//! `X-Delay`, `X-Delay-Percent`, `X-Slowdown` and `X-Slowdown-From` headers.
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! upstream_server::serve(":8081").await
//! # }
//! ```

pub mod app;
pub mod context;
pub mod handlers;
pub mod startup;

pub use app::{create_app, AppConfig};
pub use context::AppContext;
pub use startup::{
    resolve_listen_addr, serve, serve_listener, serve_tls, shutdown_signal, Server,
};
