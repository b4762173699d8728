//! Fixed-rate taxation provider plugin.
//!
//! Serves configured per-country rates, optionally adjusted per province,
//! and computes invoice tax as `taxable total x rate` rounded to a fixed
//! scale.

pub mod config;
pub mod domain;

pub use config::{FixedRateTaxPluginConfig, ProvinceConfig, TaxMethodConfig};
pub use domain::{FixedRateTaxCalculationStrategy, FixedRateTaxationProvider};
