//! Logging initialization for the upstream mock server
//!
//! Wraps `tracing-subscriber` so the binary and the tests install the same
//! subscriber shape from an [`upstream_config::LoggingConfig`].

pub mod init;

pub use init::{build_env_filter, init_logging};
