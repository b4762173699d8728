//! Domain errors for the taxation gateway.

use taxation_sdk::{GatewayProviderKey, RepositoryError, TaxationError};
use thiserror::Error;

/// Domain-level errors for taxation gateway operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No provider registered under the key
    #[error("Taxation provider not found: {key}")]
    ProviderNotFound { key: GatewayProviderKey },

    /// A provider with the same key is already registered
    #[error("Taxation provider already registered: {key}")]
    DuplicateProvider { key: GatewayProviderKey },

    /// No provider has a tax method for the country
    #[error("No tax method configured for country: {country_code}")]
    NoTaxMethod { country_code: String },

    /// Customer lookup error
    #[error("Customer lookup failed: {0}")]
    Customer(#[from] RepositoryError),

    /// Error raised by a provider or strategy
    #[error("Provider error: {0}")]
    Provider(#[from] TaxationError),
}

/// Convert domain errors to SDK errors for API boundary.
impl From<DomainError> for TaxationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::ProviderNotFound { key } => {
                TaxationError::ProviderNotFound { provider_key: key }
            }
            DomainError::DuplicateProvider { key } => TaxationError::invalid_configuration(
                format!("Taxation provider already registered: {key}"),
            ),
            DomainError::NoTaxMethod { country_code } => {
                TaxationError::NoTaxMethod { country_code }
            }
            DomainError::Customer(err) => TaxationError::Repository(err),
            DomainError::Provider(err) => err,
        }
    }
}
