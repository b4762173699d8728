//! Shared state embedded by taxation provider implementations.
//!
//! Tax methods are resolved lazily on first access and cached via
//! `OnceCell`. There is no invalidation: a provider instance presents a
//! stable view of its tax rules, and fresh configuration requires a new
//! provider instance.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::info;

use crate::error::TaxationError;
use crate::gateway_service::GatewayProviderService;
use crate::models::{GatewayProviderInfo, GatewayProviderKey, TaxMethod};

/// Provider identity, gateway provider service handle, and memoized tax methods.
pub struct TaxationGatewayProviderBase {
    info: GatewayProviderInfo,
    service: Arc<dyn GatewayProviderService>,
    /// Lazily fetched tax methods (cached after first successful call).
    tax_methods: OnceCell<Arc<[TaxMethod]>>,
}

impl TaxationGatewayProviderBase {
    #[must_use]
    pub fn new(info: GatewayProviderInfo, service: Arc<dyn GatewayProviderService>) -> Self {
        Self {
            info,
            service,
            tax_methods: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn info(&self) -> &GatewayProviderInfo {
        &self.info
    }

    #[must_use]
    pub fn key(&self) -> GatewayProviderKey {
        self.info.key
    }

    #[must_use]
    pub fn gateway_provider_service(&self) -> &Arc<dyn GatewayProviderService> {
        &self.service
    }

    /// Returns the tax methods of this provider, fetching them on first call.
    ///
    /// Concurrent first callers wait for a single fetch and all observe the
    /// same collection.
    ///
    /// # Errors
    ///
    /// Returns the gateway provider service error if the fetch fails. The
    /// failure is not cached and the next call fetches again.
    pub async fn tax_methods(&self) -> Result<Arc<[TaxMethod]>, TaxationError> {
        let methods = self
            .tax_methods
            .get_or_try_init(|| self.fetch_tax_methods())
            .await?;
        Ok(Arc::clone(methods))
    }

    #[tracing::instrument(
        skip_all,
        fields(provider.key = %self.info.key, provider.name = %self.info.name)
    )]
    async fn fetch_tax_methods(&self) -> Result<Arc<[TaxMethod]>, TaxationError> {
        let methods = self
            .service
            .get_tax_methods_by_provider_key(self.info.key)
            .await?;
        info!(count = methods.len(), "Fetched tax methods for provider");
        Ok(methods.into())
    }
}
