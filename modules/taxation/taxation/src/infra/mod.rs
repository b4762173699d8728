//! In-memory infrastructure for bootstrap deployments and tests.

pub mod memory;

pub use memory::{InMemoryCustomerRepository, InMemoryGatewayProviderService, InMemoryRepository};
