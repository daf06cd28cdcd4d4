//! Seeded resource collection configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, Validatable};
use serde::{Deserialize, Serialize};

/// Controls how `/resource` is seeded and paginated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ResourcesConfig {
    /// Number of resources created at startup
    #[serde(default = "default_seed_count")]
    pub seed_count: usize,

    /// Length of each random resource name
    #[serde(default = "default_name_length")]
    pub name_length: usize,

    /// Page size when the request has no usable `limit`
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            seed_count: default_seed_count(),
            name_length: default_name_length(),
            default_limit: default_limit(),
        }
    }
}

impl Validatable for ResourcesConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(self.seed_count, "seed_count", self.domain_name())?;
        validate_positive(self.name_length, "name_length", self.domain_name())?;
        validate_positive(self.default_limit, "default_limit", self.domain_name())?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "resources"
    }
}

fn default_seed_count() -> usize {
    100
}

fn default_name_length() -> usize {
    10
}

fn default_limit() -> usize {
    10
}
