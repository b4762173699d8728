//! Domain layer for the fixed-rate tax plugin.

pub mod provider;
pub mod strategy;

pub use provider::FixedRateTaxationProvider;
pub use strategy::FixedRateTaxCalculationStrategy;
