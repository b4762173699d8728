//! Persistence-facing service consumed by taxation providers.

use async_trait::async_trait;

use crate::error::TaxationError;
use crate::models::{GatewayProviderKey, TaxMethod};

/// Source of the tax methods configured for each gateway provider.
///
/// Providers query this once per instance lifetime; see
/// [`crate::TaxationGatewayProviderBase::tax_methods`].
#[async_trait]
pub trait GatewayProviderService: Send + Sync {
    /// Get the tax methods belonging to a provider.
    ///
    /// Returns an empty list when the provider has no tax methods.
    ///
    /// # Errors
    ///
    /// Returns error if the backing store cannot be read.
    async fn get_tax_methods_by_provider_key(
        &self,
        provider_key: GatewayProviderKey,
    ) -> Result<Vec<TaxMethod>, TaxationError>;
}
