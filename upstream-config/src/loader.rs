//! Configuration loading and environment variable handling

use crate::domains::{
    logging::LoggingConfig, resources::ResourcesConfig, server::ServerConfig, UpstreamConfig,
};
use crate::error::{ConfigError, ConfigResult};
use std::path::Path;
use std::str::FromStr;

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "UPSTREAM".to_string(),
        }
    }

    /// Load configuration from a YAML or JSON file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<UpstreamConfig> {
        let path = path.as_ref();
        tracing::debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;

        // Support both JSON and YAML formats
        let mut config: UpstreamConfig = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<UpstreamConfig> {
        let mut config = UpstreamConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<UpstreamConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut UpstreamConfig) -> ConfigResult<()> {
        self.apply_server_overrides(&mut config.server)?;
        self.apply_logging_overrides(&mut config.logging)?;
        self.apply_resource_overrides(&mut config.resources)?;
        Ok(())
    }

    /// Apply server config overrides
    fn apply_server_overrides(&self, config: &mut ServerConfig) -> ConfigResult<()> {
        if let Ok(bind) = self.get_env_var("SERVER_BIND_ADDRESS") {
            config.bind_address = bind;
        }

        if let Ok(port) = self.get_env_var("SERVER_PORT") {
            config.port = port
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid SERVER_PORT: {}", e)))?;
        }

        let cert = self.get_env_var("TLS_CERT_FILE").ok();
        let key = self.get_env_var("TLS_KEY_FILE").ok();
        if cert.is_some() || key.is_some() {
            let current = config.tls.take();
            let cert = cert.or_else(|| current.as_ref().map(|t| t.cert_file.clone()));
            let key = key.or_else(|| current.as_ref().map(|t| t.key_file.clone()));
            config.tls = crate::domains::server::TlsConfig::from_paths(cert, key)
                .map_err(|e| ConfigError::EnvError(e.to_string()))?;
        }

        Ok(())
    }

    /// Apply logging config overrides
    fn apply_logging_overrides(&self, config: &mut LoggingConfig) -> ConfigResult<()> {
        if let Ok(log_level) = self.get_env_var("LOG_LEVEL") {
            config.level = FromStr::from_str(&log_level)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_LEVEL: {}", log_level)))?;
        }

        if let Ok(format) = self.get_env_var("LOG_FORMAT") {
            config.format = FromStr::from_str(&format)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_FORMAT: {}", format)))?;
        }

        Ok(())
    }

    /// Apply resource config overrides
    fn apply_resource_overrides(&self, config: &mut ResourcesConfig) -> ConfigResult<()> {
        if let Ok(count) = self.get_env_var("RESOURCE_COUNT") {
            config.seed_count = count
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid RESOURCE_COUNT: {}", e)))?;
        }

        if let Ok(limit) = self.get_env_var("RESOURCE_DEFAULT_LIMIT") {
            config.default_limit = limit.parse().map_err(|e| {
                ConfigError::EnvError(format!("Invalid RESOURCE_DEFAULT_LIMIT: {}", e))
            })?;
        }

        Ok(())
    }

    /// Get environment variable with prefix
    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
