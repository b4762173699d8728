//! Configuration for the taxation gateway.

use serde::{Deserialize, Serialize};

/// What the context returns when no provider has a tax method for the
/// taxation address country.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UntaxedCountryPolicy {
    /// The country is not taxed: return a zero tax result.
    #[default]
    Zero,
    /// Fail with `NoTaxMethod`.
    Reject,
}

/// Taxation gateway configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaxationConfig {
    /// Behaviour for countries without a configured tax method.
    pub untaxed_country_policy: UntaxedCountryPolicy,
}
