//! Taxation gateway provider traits.
//!
//! Concrete providers implement exactly one calculation method,
//! [`TaxationGatewayProvider::calculate_tax_for_address`]. The billing-address
//! and strategy forms are provided once here in terms of it.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TaxationError;
use crate::models::{
    Address, GatewayProviderInfo, GatewayProviderKey, Invoice, InvoiceTaxResult, TaxMethod,
};
use crate::strategy::{InvoiceTaxationStrategy, run_strategy};

/// Identity shared by every gateway provider.
pub trait GatewayProvider: Send + Sync {
    /// Provider identity.
    fn info(&self) -> &GatewayProviderInfo;

    /// Unique key of this provider instance.
    fn key(&self) -> GatewayProviderKey {
        self.info().key
    }
}

/// Gateway provider that computes tax owed on invoices.
///
/// Implementations are registered with the taxation context and can also be
/// called directly:
///
/// ```ignore
/// let result = provider.calculate_tax_for_invoice(&invoice).await?;
/// ```
#[async_trait]
pub trait TaxationGatewayProvider: GatewayProvider {
    /// Tax methods configured for this provider.
    ///
    /// Fetched from the gateway provider service on first access and then
    /// returned unchanged for the lifetime of the provider instance.
    ///
    /// # Errors
    ///
    /// Returns error if the first fetch fails. Failed fetches are not cached.
    async fn tax_methods(&self) -> Result<Arc<[TaxMethod]>, TaxationError>;

    /// Calculate the tax for an invoice against an explicit taxation address.
    ///
    /// The address is either an origin or a destination address depending on
    /// the provider's taxation basis.
    ///
    /// # Errors
    ///
    /// Provider specific, e.g. [`TaxationError::UnsupportedAddress`]. Errors
    /// are propagated to the caller unchanged.
    async fn calculate_tax_for_address(
        &self,
        invoice: &Invoice,
        tax_address: &Address,
    ) -> Result<InvoiceTaxResult, TaxationError>;

    /// Calculate the tax for an invoice using its billing address.
    ///
    /// # Errors
    ///
    /// Whatever [`Self::calculate_tax_for_address`] returns.
    async fn calculate_tax_for_invoice(
        &self,
        invoice: &Invoice,
    ) -> Result<InvoiceTaxResult, TaxationError> {
        self.calculate_tax_for_address(invoice, invoice.billing_address())
            .await
    }

    /// Calculate the tax by delegating to a strategy.
    ///
    /// # Errors
    ///
    /// Returns [`TaxationError::CalculationFailure`] carrying the strategy's
    /// cause if the strategy reports a failed attempt.
    async fn calculate_tax_with_strategy(
        &self,
        strategy: &dyn InvoiceTaxationStrategy,
    ) -> Result<InvoiceTaxResult, TaxationError> {
        run_strategy(strategy).await
    }
}
