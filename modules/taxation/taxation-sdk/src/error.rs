//! Error types for the taxation module.

use thiserror::Error;

use crate::attempt::BoxError;
use crate::models::GatewayProviderKey;

/// Errors that can occur while calculating tax or reading tax configuration.
#[derive(Debug, Error)]
pub enum TaxationError {
    /// A strategy reported a failed attempt.
    ///
    /// Fatal for the calculation: no tax result is produced.
    #[error("tax calculation failed: {cause}")]
    CalculationFailure {
        /// Cause carried by the failed attempt.
        #[source]
        cause: BoxError,
    },

    /// The taxation address cannot be handled by the provider.
    #[error("unsupported taxation address: {reason}")]
    UnsupportedAddress {
        /// Why the address was rejected.
        reason: String,
    },

    /// Provider or tax method configuration is invalid.
    #[error("invalid taxation configuration: {reason}")]
    InvalidConfiguration {
        /// What is wrong with the configuration.
        reason: String,
    },

    /// No provider is registered under the key.
    #[error("taxation provider not found: {provider_key}")]
    ProviderNotFound {
        /// Requested provider key.
        provider_key: GatewayProviderKey,
    },

    /// No configured tax method covers the country.
    #[error("no tax method configured for country {country_code}")]
    NoTaxMethod {
        /// Country of the taxation address.
        country_code: String,
    },

    /// The gateway provider service could not be reached.
    #[error("gateway provider service unavailable: {message}")]
    ServiceUnavailable {
        /// Error message
        message: String,
        /// Source error
        #[source]
        source: Option<BoxError>,
    },

    /// Repository lookup failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl TaxationError {
    /// Create a calculation failure from a strategy cause.
    pub fn calculation_failure(cause: impl Into<BoxError>) -> Self {
        Self::CalculationFailure {
            cause: cause.into(),
        }
    }

    /// Create an unsupported address error.
    pub fn unsupported_address(reason: impl Into<String>) -> Self {
        Self::UnsupportedAddress {
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Create a service unavailable error with a message only.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Create a service unavailable error with a source error.
    pub fn service_unavailable_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Errors returned by keyed repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No entity has the requested key.
    #[error("{entity} not found: {key}")]
    NotFound {
        /// Entity type name.
        entity: &'static str,
        /// Requested key, rendered for display.
        key: String,
    },

    /// Backing store failure.
    #[error("storage error: {message}")]
    Storage {
        /// Error message
        message: String,
        /// Source error
        #[source]
        source: Option<BoxError>,
    },
}

impl RepositoryError {
    /// Create a `NotFound` error.
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Create a storage error with a message only.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            source: None,
        }
    }
}
