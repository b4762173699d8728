//! Fixed-rate taxation gateway provider.

use std::sync::Arc;

use async_trait::async_trait;
use taxation_sdk::{
    Address, GatewayProvider, GatewayProviderInfo, GatewayProviderService, Invoice,
    InvoiceTaxResult, TaxMethod, TaxationError, TaxationGatewayProvider,
    TaxationGatewayProviderBase,
};
use tracing::debug;

use super::strategy::FixedRateTaxCalculationStrategy;

/// Provider that taxes invoices at the configured rate of the tax address
/// country.
pub struct FixedRateTaxationProvider {
    base: TaxationGatewayProviderBase,
    rounding_scale: u32,
}

impl FixedRateTaxationProvider {
    #[must_use]
    pub fn new(
        info: GatewayProviderInfo,
        service: Arc<dyn GatewayProviderService>,
        rounding_scale: u32,
    ) -> Self {
        Self {
            base: TaxationGatewayProviderBase::new(info, service),
            rounding_scale,
        }
    }
}

impl GatewayProvider for FixedRateTaxationProvider {
    fn info(&self) -> &GatewayProviderInfo {
        self.base.info()
    }
}

#[async_trait]
impl TaxationGatewayProvider for FixedRateTaxationProvider {
    async fn tax_methods(&self) -> Result<Arc<[TaxMethod]>, TaxationError> {
        self.base.tax_methods().await
    }

    #[tracing::instrument(skip_all, fields(provider.key = %self.key(), invoice.key = %invoice.key))]
    async fn calculate_tax_for_address(
        &self,
        invoice: &Invoice,
        tax_address: &Address,
    ) -> Result<InvoiceTaxResult, TaxationError> {
        let methods = self.tax_methods().await?;
        if tax_address.is_complete()
            && !methods
                .iter()
                .any(|m| m.applies_to_country(&tax_address.country_code))
        {
            return Err(TaxationError::unsupported_address(format!(
                "no tax method for country {}",
                tax_address.country_code
            )));
        }

        let strategy = FixedRateTaxCalculationStrategy::new(
            invoice,
            tax_address,
            &methods,
            self.rounding_scale,
        );
        let result = self.calculate_tax_with_strategy(&strategy).await?;
        debug!(
            tax_method.key = ?result.tax_method_key,
            tax_amount = %result.tax_amount,
            "Calculated fixed-rate tax"
        );
        Ok(result)
    }
}
