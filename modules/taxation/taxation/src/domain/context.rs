//! Taxation context: provider registry and invoice routing.
//!
//! Providers are registered with a priority (lower = higher priority). An
//! invoice is routed to the first provider, in priority order, whose tax
//! methods cover the country of the taxation address.

use std::sync::Arc;

use taxation_sdk::{
    Address, CustomerRepository, GatewayProviderKey, Invoice, InvoiceTaxResult, TaxMethod,
    TaxationError, TaxationGatewayProvider,
};
use tracing::{debug, info};

use crate::config::{TaxationConfig, UntaxedCountryPolicy};
use crate::domain::error::DomainError;

struct RegisteredProvider {
    provider: Arc<dyn TaxationGatewayProvider>,
    priority: i16,
}

/// Entry point used by order and checkout code to calculate invoice tax.
pub struct TaxationContext {
    config: TaxationConfig,
    /// Sorted by priority; equal priorities keep registration order.
    providers: Vec<RegisteredProvider>,
    customers: Option<Arc<CustomerRepository>>,
}

impl TaxationContext {
    #[must_use]
    pub fn new(config: TaxationConfig) -> Self {
        Self {
            config,
            providers: Vec::new(),
            customers: None,
        }
    }

    /// Enables tax-exempt handling for invoices that name a customer.
    #[must_use]
    pub fn with_customer_repository(mut self, customers: Arc<CustomerRepository>) -> Self {
        self.customers = Some(customers);
        self
    }

    /// Registers a provider.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DuplicateProvider`] if a provider with the same
    /// key is already registered.
    pub fn register(
        &mut self,
        provider: Arc<dyn TaxationGatewayProvider>,
        priority: i16,
    ) -> Result<(), DomainError> {
        let key = provider.key();
        if self.providers.iter().any(|p| p.provider.key() == key) {
            return Err(DomainError::DuplicateProvider { key });
        }

        let position = self
            .providers
            .iter()
            .position(|p| p.priority > priority)
            .unwrap_or(self.providers.len());
        info!(
            provider.key = %key,
            provider.name = %provider.info().name,
            priority,
            "Registered taxation provider"
        );
        self.providers
            .insert(position, RegisteredProvider { provider, priority });
        Ok(())
    }

    /// Registered providers in selection order.
    #[must_use = "iterators are lazy"]
    pub fn providers(&self) -> impl Iterator<Item = &Arc<dyn TaxationGatewayProvider>> {
        self.providers.iter().map(|p| &p.provider)
    }

    /// Returns the provider registered under the key.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ProviderNotFound`] for an unknown key.
    pub fn provider(
        &self,
        key: GatewayProviderKey,
    ) -> Result<Arc<dyn TaxationGatewayProvider>, DomainError> {
        self.providers
            .iter()
            .find(|p| p.provider.key() == key)
            .map(|p| Arc::clone(&p.provider))
            .ok_or(DomainError::ProviderNotFound { key })
    }

    /// Finds the first tax method, in provider priority order, that covers
    /// the country.
    ///
    /// # Errors
    ///
    /// Returns error if a provider's tax methods cannot be fetched.
    #[tracing::instrument(skip_all, fields(country_code = %country_code))]
    pub async fn tax_method_for_country(
        &self,
        country_code: &str,
    ) -> Result<Option<(Arc<dyn TaxationGatewayProvider>, TaxMethod)>, DomainError> {
        for registered in &self.providers {
            let methods = registered.provider.tax_methods().await?;
            if let Some(method) = methods.iter().find(|m| m.applies_to_country(country_code)) {
                debug!(
                    provider.key = %registered.provider.key(),
                    tax_method.key = %method.key,
                    "Selected tax method"
                );
                return Ok(Some((Arc::clone(&registered.provider), method.clone())));
            }
        }
        Ok(None)
    }

    /// Calculates the tax for an invoice using its billing address.
    ///
    /// # Errors
    ///
    /// See [`Self::calculate_tax_for_address`].
    pub async fn calculate_tax_for_invoice(
        &self,
        invoice: &Invoice,
    ) -> Result<InvoiceTaxResult, DomainError> {
        self.calculate_tax_for_address(invoice, invoice.billing_address())
            .await
    }

    /// Calculates the tax for an invoice against an explicit address.
    ///
    /// Tax-exempt customers and, under [`UntaxedCountryPolicy::Zero`],
    /// countries without tax methods yield a zero result.
    ///
    /// # Errors
    ///
    /// - `UnsupportedAddress` if the address has no country code
    /// - `Customer` if the invoice customer does not exist
    /// - `NoTaxMethod` for untaxed countries under [`UntaxedCountryPolicy::Reject`]
    /// - any error raised by the selected provider
    #[tracing::instrument(skip_all, fields(invoice.key = %invoice.key, country_code = %tax_address.country_code))]
    pub async fn calculate_tax_for_address(
        &self,
        invoice: &Invoice,
        tax_address: &Address,
    ) -> Result<InvoiceTaxResult, DomainError> {
        if !tax_address.is_complete() {
            return Err(TaxationError::unsupported_address("address incomplete").into());
        }

        if let (Some(customers), Some(customer_key)) = (&self.customers, invoice.customer_key) {
            let customer = customers.find(&customer_key).await?;
            if customer.tax_exempt {
                debug!(customer.key = %customer_key, "Customer is tax exempt");
                return Ok(InvoiceTaxResult::zero(invoice.key));
            }
        }

        let Some((provider, method)) = self
            .tax_method_for_country(&tax_address.country_code)
            .await?
        else {
            return match self.config.untaxed_country_policy {
                UntaxedCountryPolicy::Zero => {
                    debug!("No tax method for country, invoice is untaxed");
                    Ok(InvoiceTaxResult::zero(invoice.key))
                }
                UntaxedCountryPolicy::Reject => Err(DomainError::NoTaxMethod {
                    country_code: tax_address.country_code.clone(),
                }),
            };
        };

        let result = provider
            .calculate_tax_for_address(invoice, tax_address)
            .await?;
        debug!(
            provider.key = %provider.key(),
            tax_method.key = %method.key,
            tax_amount = %result.tax_amount,
            "Calculated invoice tax"
        );
        Ok(result)
    }
}
