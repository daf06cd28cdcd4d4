//! Domain-driven configuration for the upstream mock server
//!
//! Configuration is split by functional domain (server, logging, resources),
//! each with defaults and validation, and can be loaded from YAML or JSON with
//! `UPSTREAM_*` environment variable overrides.

pub mod domains;
pub mod error;
pub mod loader;
pub mod validation;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

// Re-export domain configurations
pub use domains::{
    logging::{LogFormat, LogLevel, LoggingConfig},
    resources::ResourcesConfig,
    server::{ServerConfig, TlsConfig},
    UpstreamConfig,
};
