//! Domain models for tax calculation.
//!
//! These models are transport-agnostic (no serde). Configuration and
//! CLI layers define their own serde types and convert into these.
//!
//! All monetary amounts and rates are [`Decimal`]; rates are fractions
//! (`0.07` is 7%).

use std::fmt;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::repo::Entity;

/// Unique key identifying a gateway provider instance.
///
/// Scopes which tax methods belong to a provider. Treated as opaque by the
/// taxation core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GatewayProviderKey(Uuid);

impl GatewayProviderKey {
    #[must_use]
    pub const fn new(key: Uuid) -> Self {
        Self(key)
    }

    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for GatewayProviderKey {
    fn from(key: Uuid) -> Self {
        Self(key)
    }
}

impl fmt::Display for GatewayProviderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity of a registered gateway provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayProviderInfo {
    pub key: GatewayProviderKey,
    pub name: String,
    pub description: Option<String>,
}

impl GatewayProviderInfo {
    pub fn new(key: impl Into<GatewayProviderKey>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Physical location used to determine applicable tax rates.
///
/// Either an origin (seller) or destination (buyer/billing) address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub name: Option<String>,
    pub address1: String,
    pub address2: Option<String>,
    pub locality: String,
    /// Province or state code.
    pub region: Option<String>,
    pub postal_code: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: String,
}

impl Address {
    /// Returns `true` when the address carries enough data to pick a tax jurisdiction.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.country_code.trim().is_empty()
    }
}

/// Single billable line of an invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceLineItem {
    pub sku: String,
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
    pub taxable: bool,
}

impl InvoiceLineItem {
    /// Extended price of the line (`price * quantity`), `None` on overflow.
    #[must_use]
    pub fn total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Billable order as seen by the taxation core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    pub key: Uuid,
    pub invoice_number: String,
    pub currency_code: String,
    pub customer_key: Option<Uuid>,
    pub billing_address: Address,
    pub items: Vec<InvoiceLineItem>,
}

impl Invoice {
    /// Address of the invoice payer, the default taxation basis.
    #[must_use]
    pub fn billing_address(&self) -> &Address {
        &self.billing_address
    }

    /// Sum of the taxable line item totals, `None` on overflow.
    #[must_use]
    pub fn taxable_total(&self) -> Option<Decimal> {
        self.items
            .iter()
            .filter(|item| item.taxable)
            .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.total()?))
    }
}

/// Province level adjustment added on top of a country rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvinceTaxRate {
    pub code: String,
    pub rate_adjustment: Decimal,
}

/// Configured tax rule belonging to a gateway provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxMethod {
    pub key: Uuid,
    pub provider_key: GatewayProviderKey,
    pub name: String,
    pub country_code: String,
    pub rate: Decimal,
    pub provinces: Vec<ProvinceTaxRate>,
}

impl TaxMethod {
    /// Returns `true` if this method covers the given country.
    #[must_use]
    pub fn applies_to_country(&self, country_code: &str) -> bool {
        self.country_code.eq_ignore_ascii_case(country_code.trim())
    }

    /// Effective rate for an address region: base rate plus the matching
    /// province adjustment, if any.
    #[must_use]
    pub fn rate_for_region(&self, region: Option<&str>) -> Decimal {
        let adjustment = region
            .and_then(|code| {
                self.provinces
                    .iter()
                    .find(|p| p.code.eq_ignore_ascii_case(code.trim()))
            })
            .map_or(Decimal::ZERO, |p| p.rate_adjustment);
        self.rate + adjustment
    }
}

/// Output of a single tax calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceTaxResult {
    pub invoice_key: Uuid,
    /// Tax method that produced the result, `None` for untaxed invoices.
    pub tax_method_key: Option<Uuid>,
    pub taxable_amount: Decimal,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
}

impl InvoiceTaxResult {
    /// Result for an invoice that owes no tax.
    #[must_use]
    pub fn zero(invoice_key: Uuid) -> Self {
        Self {
            invoice_key,
            tax_method_key: None,
            taxable_amount: Decimal::ZERO,
            tax_rate: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
        }
    }
}

/// Customer record looked up by the order pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub key: Uuid,
    pub login_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub tax_exempt: bool,
}

impl Entity<Uuid> for Customer {
    const NAME: &'static str = "customer";

    fn key(&self) -> Uuid {
        self.key
    }
}
