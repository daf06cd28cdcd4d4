//! Listener configuration for plain HTTP and TLS

use crate::error::{ConfigError, ConfigResult};
use crate::validation::{validate_required_string, Validatable};
use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Wrap each request in a `tower-http` trace span
    #[serde(default = "crate::domains::utils::default_true")]
    pub enable_tracing: bool,

    /// Propagate or generate `X-Request-ID`
    #[serde(default = "crate::domains::utils::default_true")]
    pub enable_request_id: bool,

    /// TLS configuration; plain HTTP when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsConfig>,
}

/// TLS configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TlsConfig {
    /// Path to PEM certificate file
    pub cert_file: String,

    /// Path to PEM private key file
    pub key_file: String,
}

impl ServerConfig {
    /// `host:port` to bind; the host may be an IP literal or a hostname
    pub fn listen_address(&self) -> String {
        if self.bind_address.contains(':') && !self.bind_address.starts_with('[') {
            format!("[{}]:{}", self.bind_address, self.port)
        } else {
            format!("{}:{}", self.bind_address, self.port)
        }
    }

    /// Apply a `host:port` listen address; an empty host (`:8081`) binds all interfaces
    pub fn set_listen_address(&mut self, addr: &str) -> ConfigResult<()> {
        let (host, port) = addr
            .rsplit_once(':')
            .ok_or_else(|| self.validation_error(format!("Listen address '{}' has no port", addr)))?;

        let port = port.parse::<u16>().map_err(|e| {
            self.validation_error(format!("Invalid port in listen address '{}': {}", addr, e))
        })?;

        let host = host.trim_start_matches('[').trim_end_matches(']');
        self.bind_address = if host.is_empty() {
            default_bind_address()
        } else {
            host.to_string()
        };
        self.port = port;

        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            enable_tracing: true,
            enable_request_id: true,
            tls: None,
        }
    }
}

impl Validatable for ServerConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.bind_address, "bind_address", self.domain_name())?;
        // Port 0 asks the OS for an ephemeral port
        if self.bind_address.chars().any(char::is_whitespace) {
            return Err(self.validation_error(format!(
                "Invalid bind address '{}'",
                self.bind_address
            )));
        }

        if let Some(ref tls) = self.tls {
            tls.validate()?;
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "server"
    }
}

impl Validatable for TlsConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.cert_file, "cert_file", self.domain_name())?;
        validate_required_string(&self.key_file, "key_file", self.domain_name())?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "server.tls"
    }
}

impl TlsConfig {
    /// Build from optional paths; both or neither must be given
    pub fn from_paths(
        cert_file: Option<String>,
        key_file: Option<String>,
    ) -> ConfigResult<Option<Self>> {
        match (cert_file, key_file) {
            (Some(cert_file), Some(key_file)) => Ok(Some(Self { cert_file, key_file })),
            (None, None) => Ok(None),
            _ => Err(ConfigError::DomainError {
                domain: "server.tls".to_string(),
                message: "cert_file and key_file must be provided together".to_string(),
            }),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}
