//! Keyed repository contract.
//!
//! Persistence operations for entities identified by a unique key. No
//! caching is promised at this layer; callers cache if they need to.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::Customer;

/// Entity stored in a keyed repository.
pub trait Entity<K> {
    /// Entity type name used in error messages.
    const NAME: &'static str;

    /// Unique key of this entity.
    fn key(&self) -> K;
}

/// Look up or persist entities of type `E` by a unique key of type `K`.
///
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait Repository<K, E>: Send + Sync
where
    K: Send + Sync + 'static,
    E: Entity<K> + Send + 'static,
{
    /// Load an entity by key.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if no entity has that key.
    async fn find(&self, key: &K) -> Result<E, RepositoryError>;

    /// Load several entities. Missing keys are skipped.
    ///
    /// # Errors
    ///
    /// Returns error if the backing store fails.
    async fn find_many(&self, keys: &[K]) -> Result<Vec<E>, RepositoryError>;

    /// Check whether an entity with the key exists.
    ///
    /// # Errors
    ///
    /// Returns error if the backing store fails.
    async fn exists(&self, key: &K) -> Result<bool, RepositoryError>;

    /// Insert the entity, replacing any entity with the same key.
    ///
    /// # Errors
    ///
    /// Returns error if the backing store fails.
    async fn add_or_update(&self, entity: E) -> Result<(), RepositoryError>;

    /// Delete by key. Returns `true` if an entity was removed.
    ///
    /// # Errors
    ///
    /// Returns error if the backing store fails.
    async fn delete(&self, key: &K) -> Result<bool, RepositoryError>;
}

/// Customer records keyed by their unique identifier.
pub type CustomerRepository = dyn Repository<Uuid, Customer>;
