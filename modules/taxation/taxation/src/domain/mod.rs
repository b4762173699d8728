//! Domain layer for the taxation gateway.

pub mod context;
pub mod error;

pub use context::TaxationContext;
pub use error::DomainError;
