//! Taxation SDK
//!
//! This crate provides the public API for the `taxation` module:
//!
//! - [`TaxationGatewayProvider`] - Provider trait implemented by tax calculation variants
//! - [`InvoiceTaxationStrategy`] - Pluggable, provider-independent calculation unit
//! - [`Attempt`] - Success/failure value returned across the strategy boundary
//! - [`TaxationGatewayProviderBase`] - Provider identity plus memoized tax methods
//! - [`GatewayProviderService`] - Persistence-facing source of configured tax methods
//! - [`Repository`], [`CustomerRepository`] - Keyed entity lookup contract
//! - [`TaxationError`], [`RepositoryError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use taxation_sdk::TaxationGatewayProvider;
//!
//! // Billing address is the taxation basis
//! let result = provider.calculate_tax_for_invoice(&invoice).await?;
//!
//! // Explicit origin or destination address
//! let result = provider.calculate_tax_for_address(&invoice, &origin).await?;
//!
//! // Delegate to a strategy; a failed attempt becomes `TaxationError::CalculationFailure`
//! let result = provider.calculate_tax_with_strategy(&strategy).await?;
//!
//! // Tax methods are fetched once per provider instance
//! let methods = provider.tax_methods().await?;
//! ```
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod attempt;
pub mod error;
pub mod gateway_service;
pub mod models;
pub mod provider;
pub mod provider_base;
pub mod repo;
pub mod strategy;

// Re-export main types at crate root
pub use attempt::{Attempt, BoxError};
pub use error::{RepositoryError, TaxationError};
pub use gateway_service::GatewayProviderService;
pub use models::{
    Address, Customer, GatewayProviderInfo, GatewayProviderKey, Invoice, InvoiceLineItem,
    InvoiceTaxResult, ProvinceTaxRate, TaxMethod,
};
pub use provider::{GatewayProvider, TaxationGatewayProvider};
pub use provider_base::TaxationGatewayProviderBase;
pub use repo::{CustomerRepository, Entity, Repository};
pub use strategy::{InvoiceTaxationStrategy, run_strategy};
