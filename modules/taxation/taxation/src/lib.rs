//! Taxation Module
//!
//! Gateway that routes invoice tax calculation to registered taxation
//! providers.
//!
//! ## Architecture
//!
//! - **Context**: [`TaxationContext`] holds providers ordered by priority and
//!   selects the one whose tax methods cover the taxation address country
//! - **Providers**: implement [`taxation_sdk::TaxationGatewayProvider`]; see the
//!   fixed-rate plugin for a concrete variant
//! - **Infra**: in-memory gateway provider service and keyed repositories for
//!   bootstrap and tests

// Re-export SDK types
pub use taxation_sdk::*;

pub mod config;
pub mod domain;
pub mod infra;

pub use config::{TaxationConfig, UntaxedCountryPolicy};
pub use domain::{DomainError, TaxationContext};
pub use infra::{InMemoryCustomerRepository, InMemoryGatewayProviderService, InMemoryRepository};
