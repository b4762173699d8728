//! Serde input/output shapes for the command line. Domain models stay
//! transport agnostic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use taxation::{Address, Invoice, InvoiceLineItem, InvoiceTaxResult, TaxMethod};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InvoiceInput {
    #[serde(default)]
    pub key: Option<Uuid>,
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default = "default_currency")]
    pub currency_code: String,
    #[serde(default)]
    pub customer_key: Option<Uuid>,
    pub billing_address: AddressInput,
    #[serde(default)]
    pub items: Vec<LineItemInput>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AddressInput {
    pub name: Option<String>,
    pub address1: String,
    pub address2: Option<String>,
    pub locality: String,
    pub region: Option<String>,
    pub postal_code: String,
    pub country_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LineItemInput {
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub price: Decimal,
    #[serde(default = "default_taxable")]
    pub taxable: bool,
}

fn default_currency() -> String {
    "USD".to_owned()
}

fn default_quantity() -> u32 {
    1
}

fn default_taxable() -> bool {
    true
}

impl From<InvoiceInput> for Invoice {
    fn from(input: InvoiceInput) -> Self {
        Self {
            key: input.key.unwrap_or_else(Uuid::new_v4),
            invoice_number: input.invoice_number,
            currency_code: input.currency_code,
            customer_key: input.customer_key,
            billing_address: input.billing_address.into(),
            items: input.items.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<AddressInput> for Address {
    fn from(input: AddressInput) -> Self {
        Self {
            name: input.name,
            address1: input.address1,
            address2: input.address2,
            locality: input.locality,
            region: input.region,
            postal_code: input.postal_code,
            country_code: input.country_code,
        }
    }
}

impl From<LineItemInput> for InvoiceLineItem {
    fn from(input: LineItemInput) -> Self {
        Self {
            sku: input.sku,
            name: input.name,
            quantity: input.quantity,
            price: input.price,
            taxable: input.taxable,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TaxResultOutput {
    pub invoice_key: Uuid,
    pub tax_method_key: Option<Uuid>,
    pub taxable_amount: Decimal,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
}

impl From<InvoiceTaxResult> for TaxResultOutput {
    fn from(result: InvoiceTaxResult) -> Self {
        Self {
            invoice_key: result.invoice_key,
            tax_method_key: result.tax_method_key,
            taxable_amount: result.taxable_amount,
            tax_rate: result.tax_rate,
            tax_amount: result.tax_amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TaxMethodOutput {
    pub key: Uuid,
    pub provider_key: Uuid,
    pub name: String,
    pub country_code: String,
    pub rate: Decimal,
    pub provinces: Vec<ProvinceOutput>,
}

#[derive(Debug, Serialize)]
pub struct ProvinceOutput {
    pub code: String,
    pub rate_adjustment: Decimal,
}

impl From<&TaxMethod> for TaxMethodOutput {
    fn from(method: &TaxMethod) -> Self {
        Self {
            key: method.key,
            provider_key: method.provider_key.as_uuid(),
            name: method.name.clone(),
            country_code: method.country_code.clone(),
            rate: method.rate,
            provinces: method
                .provinces
                .iter()
                .map(|p| ProvinceOutput {
                    code: p.code.clone(),
                    rate_adjustment: p.rate_adjustment,
                })
                .collect(),
        }
    }
}
