//! Fixed-rate invoice taxation strategy.

use async_trait::async_trait;
use rust_decimal::RoundingStrategy;
use taxation_sdk::{
    Address, Attempt, Invoice, InvoiceTaxResult, InvoiceTaxationStrategy, TaxMethod,
};

/// Taxes the invoice's taxable total at the rate of the tax method covering
/// the address country, adjusted for the address region.
pub struct FixedRateTaxCalculationStrategy<'a> {
    invoice: &'a Invoice,
    tax_address: &'a Address,
    tax_methods: &'a [TaxMethod],
    rounding_scale: u32,
}

impl<'a> FixedRateTaxCalculationStrategy<'a> {
    #[must_use]
    pub fn new(
        invoice: &'a Invoice,
        tax_address: &'a Address,
        tax_methods: &'a [TaxMethod],
        rounding_scale: u32,
    ) -> Self {
        Self {
            invoice,
            tax_address,
            tax_methods,
            rounding_scale,
        }
    }
}

#[async_trait]
impl InvoiceTaxationStrategy for FixedRateTaxCalculationStrategy<'_> {
    async fn calculate_taxes_for_invoice(&self) -> Attempt<InvoiceTaxResult> {
        if !self.tax_address.is_complete() {
            return Attempt::fail("address incomplete");
        }
        let Some(tax_method) = self
            .tax_methods
            .iter()
            .find(|m| m.applies_to_country(&self.tax_address.country_code))
        else {
            return Attempt::fail(format!(
                "no tax method for country {}",
                self.tax_address.country_code
            ));
        };

        let rate = tax_method.rate_for_region(self.tax_address.region.as_deref());
        let Some(taxable_amount) = self.invoice.taxable_total() else {
            return Attempt::fail("taxable amount overflow");
        };
        let Some(tax_amount) = taxable_amount.checked_mul(rate) else {
            return Attempt::fail("tax amount overflow");
        };

        Attempt::succeed(InvoiceTaxResult {
            invoice_key: self.invoice.key,
            tax_method_key: Some(tax_method.key),
            taxable_amount,
            tax_rate: rate,
            tax_amount: tax_amount.round_dp_with_strategy(
                self.rounding_scale,
                RoundingStrategy::MidpointAwayFromZero,
            ),
        })
    }
}
