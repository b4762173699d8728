//! Configuration for the fixed-rate tax plugin.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use taxation_sdk::{
    GatewayProviderInfo, GatewayProviderKey, ProvinceTaxRate, TaxMethod, TaxationError,
};
use uuid::Uuid;

/// Fixed-rate tax plugin configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixedRateTaxPluginConfig {
    /// Gateway provider key of this plugin instance.
    pub key: Uuid,

    /// Display name of the provider.
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Priority for provider selection (lower = higher priority).
    #[serde(default = "default_priority")]
    pub priority: i16,

    /// Decimal places tax amounts are rounded to.
    #[serde(default = "default_rounding_scale")]
    pub rounding_scale: u32,

    /// Tax methods served by this provider, one per country.
    #[serde(default)]
    pub tax_methods: Vec<TaxMethodConfig>,
}

/// A country rate with optional province adjustments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaxMethodConfig {
    /// Stable key; derived from provider key and country when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Uuid>,

    pub name: String,

    /// ISO 3166-1 alpha-2 country code.
    pub country_code: String,

    /// Rate as a fraction, `0.07` for 7%.
    pub rate: Decimal,

    #[serde(default)]
    pub provinces: Vec<ProvinceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvinceConfig {
    pub code: String,
    pub rate_adjustment: Decimal,
}

fn default_name() -> String {
    "Fixed rate tax provider".to_owned()
}

fn default_priority() -> i16 {
    100
}

fn default_rounding_scale() -> u32 {
    2
}

impl FixedRateTaxPluginConfig {
    #[must_use]
    pub fn provider_key(&self) -> GatewayProviderKey {
        GatewayProviderKey::new(self.key)
    }

    #[must_use]
    pub fn provider_info(&self) -> GatewayProviderInfo {
        let info = GatewayProviderInfo::new(self.key, self.name.clone());
        match &self.description {
            Some(description) => info.with_description(description.clone()),
            None => info,
        }
    }

    /// Validates rates and country codes.
    ///
    /// # Errors
    ///
    /// Returns [`TaxationError::InvalidConfiguration`] if a rate (including
    /// province adjusted rates) is outside `[0, 1]`, a country code is blank,
    /// or a country is configured twice.
    pub fn validate(&self) -> Result<(), TaxationError> {
        let mut countries = HashSet::new();
        for method in &self.tax_methods {
            let country = method.country_code.trim().to_ascii_uppercase();
            if country.is_empty() {
                return Err(TaxationError::invalid_configuration(format!(
                    "tax method '{}' has a blank country code",
                    method.name
                )));
            }
            if !countries.insert(country.clone()) {
                return Err(TaxationError::invalid_configuration(format!(
                    "country {country} is configured more than once"
                )));
            }
            check_rate(&country, method.rate)?;
            for province in &method.provinces {
                check_rate(
                    &format!("{country}/{}", province.code),
                    method.rate + province.rate_adjustment,
                )?;
            }
        }
        Ok(())
    }

    /// Tax methods of this provider as domain models.
    #[must_use]
    pub fn tax_methods(&self) -> Vec<TaxMethod> {
        let provider_key = self.provider_key();
        self.tax_methods
            .iter()
            .map(|method| {
                let country_code = method.country_code.trim().to_ascii_uppercase();
                TaxMethod {
                    key: method.key.unwrap_or_else(|| {
                        Uuid::new_v5(&provider_key.as_uuid(), country_code.as_bytes())
                    }),
                    provider_key,
                    name: method.name.clone(),
                    country_code,
                    rate: method.rate,
                    provinces: method
                        .provinces
                        .iter()
                        .map(|p| ProvinceTaxRate {
                            code: p.code.clone(),
                            rate_adjustment: p.rate_adjustment,
                        })
                        .collect(),
                }
            })
            .collect()
    }
}

fn check_rate(scope: &str, rate: Decimal) -> Result<(), TaxationError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(TaxationError::invalid_configuration(format!(
            "rate {rate} for {scope} is outside [0, 1]"
        )));
    }
    Ok(())
}
