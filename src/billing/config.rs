//! Pricing configuration, loaded from TOML.

use super::cost::{Pricing, DEFAULT_UNIT_PRICE};
use crate::validation::{pricing_rules, Violation};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the pricing config file.
pub const CONFIG_ENV_VAR: &str = "TAPMETER_CONFIG";

/// Errors that can occur while loading pricing configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid pricing config: {}", format_violations(.0))]
    Invalid(Vec<Violation>),
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn default_unit_price() -> f64 {
    DEFAULT_UNIT_PRICE
}

/// Pricing section of the deployment config.
///
/// ```toml
/// unit_price = 12.25
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PricingConfig {
    #[serde(default = "default_unit_price")]
    pub unit_price: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            unit_price: DEFAULT_UNIT_PRICE,
        }
    }
}

impl PricingConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let cfg: PricingConfig = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load from the file named by `TAPMETER_CONFIG`, or the defaults when
    /// the variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        pricing_rules()
            .check(&self.pricing())
            .map_err(ConfigError::Invalid)
    }

    pub fn pricing(&self) -> Pricing {
        Pricing::new(self.unit_price)
    }
}
