//! Layered application configuration.

use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use fixed_rate_tax_plugin::FixedRateTaxPluginConfig;
use serde::{Deserialize, Serialize};
use taxation::{Customer, TaxationConfig};
use uuid::Uuid;

/// Environment variable prefix; `__` separates nested keys.
pub const ENV_PREFIX: &str = "TAXATION__";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub taxation: TaxationConfig,
    pub fixed_rate_providers: Vec<FixedRateTaxPluginConfig>,
    pub customers: Vec<CustomerConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// Emit JSON lines instead of human readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomerConfig {
    pub key: Uuid,
    pub login_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub tax_exempt: bool,
}

impl From<&CustomerConfig> for Customer {
    fn from(cfg: &CustomerConfig) -> Self {
        Self {
            key: cfg.key,
            login_name: cfg.login_name.clone(),
            first_name: cfg.first_name.clone(),
            last_name: cfg.last_name.clone(),
            email: cfg.email.clone(),
            tax_exempt: cfg.tax_exempt,
        }
    }
}

impl AppConfig {
    /// Loads defaults, then the YAML file (if any), then `TAXATION__*`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns error if a layer cannot be parsed or does not match the
    /// configuration schema.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("failed to load configuration")
    }

    /// Validates every configured provider.
    ///
    /// # Errors
    ///
    /// Returns the first provider validation failure.
    pub fn validate(&self) -> Result<()> {
        for provider in &self.fixed_rate_providers {
            provider
                .validate()
                .with_context(|| format!("fixed rate provider {}", provider.key))?;
        }
        Ok(())
    }
}
