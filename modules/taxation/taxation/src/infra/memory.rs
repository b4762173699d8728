//! In-memory implementations of the gateway provider service and keyed
//! repositories. Used for bootstrap configuration and tests.

use std::fmt::Display;
use std::hash::Hash;
use std::marker::PhantomData;

use async_trait::async_trait;
use dashmap::DashMap;
use taxation_sdk::{
    Customer, Entity, GatewayProviderKey, GatewayProviderService, Repository, RepositoryError,
    TaxMethod, TaxationError,
};
use uuid::Uuid;

/// Tax methods held in memory, keyed by owning provider.
#[derive(Default)]
pub struct InMemoryGatewayProviderService {
    tax_methods: DashMap<GatewayProviderKey, Vec<TaxMethod>>,
}

impl InMemoryGatewayProviderService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all tax methods of a provider.
    pub fn set_tax_methods(&self, provider_key: GatewayProviderKey, methods: Vec<TaxMethod>) {
        self.tax_methods.insert(provider_key, methods);
    }

    /// Inserts a tax method, replacing one with the same key.
    pub fn upsert_tax_method(&self, method: TaxMethod) {
        let mut methods = self.tax_methods.entry(method.provider_key).or_default();
        match methods.iter_mut().find(|m| m.key == method.key) {
            Some(existing) => *existing = method,
            None => methods.push(method),
        }
    }

    /// Removes all tax methods of a provider. Returns how many were removed.
    pub fn remove_tax_methods(&self, provider_key: GatewayProviderKey) -> usize {
        self.tax_methods
            .remove(&provider_key)
            .map_or(0, |(_, methods)| methods.len())
    }
}

#[async_trait]
impl GatewayProviderService for InMemoryGatewayProviderService {
    async fn get_tax_methods_by_provider_key(
        &self,
        provider_key: GatewayProviderKey,
    ) -> Result<Vec<TaxMethod>, TaxationError> {
        Ok(self
            .tax_methods
            .get(&provider_key)
            .map(|methods| methods.clone())
            .unwrap_or_default())
    }
}

/// Keyed repository backed by a concurrent map.
pub struct InMemoryRepository<K, E> {
    entities: DashMap<K, E>,
    _key: PhantomData<fn() -> K>,
}

impl<K, E> InMemoryRepository<K, E>
where
    K: Eq + Hash,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            entities: DashMap::new(),
            _key: PhantomData,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl<K, E> Default for InMemoryRepository<K, E>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, E> FromIterator<E> for InMemoryRepository<K, E>
where
    K: Eq + Hash,
    E: Entity<K>,
{
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let repo = Self::new();
        for entity in iter {
            repo.entities.insert(entity.key(), entity);
        }
        repo
    }
}

#[async_trait]
impl<K, E> Repository<K, E> for InMemoryRepository<K, E>
where
    K: Eq + Hash + Display + Send + Sync + 'static,
    E: Entity<K> + Clone + Send + Sync + 'static,
{
    async fn find(&self, key: &K) -> Result<E, RepositoryError> {
        self.entities
            .get(key)
            .map(|entity| entity.clone())
            .ok_or_else(|| RepositoryError::not_found(E::NAME, key))
    }

    async fn find_many(&self, keys: &[K]) -> Result<Vec<E>, RepositoryError> {
        Ok(keys
            .iter()
            .filter_map(|key| self.entities.get(key).map(|entity| entity.clone()))
            .collect())
    }

    async fn exists(&self, key: &K) -> Result<bool, RepositoryError> {
        Ok(self.entities.contains_key(key))
    }

    async fn add_or_update(&self, entity: E) -> Result<(), RepositoryError> {
        self.entities.insert(entity.key(), entity);
        Ok(())
    }

    async fn delete(&self, key: &K) -> Result<bool, RepositoryError> {
        Ok(self.entities.remove(key).is_some())
    }
}

/// Customers held in memory.
pub type InMemoryCustomerRepository = InMemoryRepository<Uuid, Customer>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn method(provider_key: GatewayProviderKey, country: &str) -> TaxMethod {
        TaxMethod {
            key: Uuid::new_v4(),
            provider_key,
            name: format!("{country} VAT"),
            country_code: country.to_owned(),
            rate: Decimal::new(20, 2),
            provinces: Vec::new(),
        }
    }

    fn customer(login: &str) -> Customer {
        Customer {
            key: Uuid::new_v4(),
            login_name: login.to_owned(),
            first_name: "Test".to_owned(),
            last_name: "Customer".to_owned(),
            email: format!("{login}@example.com"),
            tax_exempt: false,
        }
    }

    #[tokio::test]
    async fn test_unknown_provider_has_no_tax_methods() {
        let service = InMemoryGatewayProviderService::new();
        let methods = service
            .get_tax_methods_by_provider_key(GatewayProviderKey::new(Uuid::new_v4()))
            .await
            .unwrap();
        assert!(methods.is_empty());
    }

    #[tokio::test]
    async fn test_tax_methods_are_scoped_to_provider() {
        let service = InMemoryGatewayProviderService::new();
        let a = GatewayProviderKey::new(Uuid::new_v4());
        let b = GatewayProviderKey::new(Uuid::new_v4());
        service.set_tax_methods(a, vec![method(a, "GB"), method(a, "FR")]);
        service.set_tax_methods(b, vec![method(b, "DE")]);

        let methods = service.get_tax_methods_by_provider_key(a).await.unwrap();
        assert_eq!(methods.len(), 2);
        assert!(methods.iter().all(|m| m.provider_key == a));
    }

    #[tokio::test]
    async fn test_upsert_replaces_by_key() {
        let service = InMemoryGatewayProviderService::new();
        let key = GatewayProviderKey::new(Uuid::new_v4());
        let mut gb = method(key, "GB");
        service.upsert_tax_method(gb.clone());
        gb.rate = Decimal::new(5, 2);
        service.upsert_tax_method(gb.clone());
        service.upsert_tax_method(method(key, "IE"));

        let methods = service.get_tax_methods_by_provider_key(key).await.unwrap();
        assert_eq!(methods.len(), 2);
        assert_eq!(methods[0], gb);

        assert_eq!(service.remove_tax_methods(key), 2);
        assert_eq!(service.remove_tax_methods(key), 0);
    }

    #[tokio::test]
    async fn test_repository_crud() {
        let repo = InMemoryCustomerRepository::new();
        let alice = customer("alice");
        let bob = customer("bob");

        repo.add_or_update(alice.clone()).await.unwrap();
        repo.add_or_update(bob.clone()).await.unwrap();
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.find(&alice.key).await.unwrap(), alice);
        assert!(repo.exists(&bob.key).await.unwrap());

        let found = repo
            .find_many(&[alice.key, Uuid::new_v4(), bob.key])
            .await
            .unwrap();
        assert_eq!(found.len(), 2);

        let mut exempt = alice.clone();
        exempt.tax_exempt = true;
        repo.add_or_update(exempt).await.unwrap();
        assert!(repo.find(&alice.key).await.unwrap().tax_exempt);

        assert!(repo.delete(&alice.key).await.unwrap());
        assert!(!repo.delete(&alice.key).await.unwrap());
    }

    #[tokio::test]
    async fn test_repository_missing_key_is_not_found() {
        let repo: InMemoryCustomerRepository = [customer("carol")].into_iter().collect();
        let missing = Uuid::new_v4();

        let err = repo.find(&missing).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { entity: "customer", .. }));
        assert_eq!(err.to_string(), format!("customer not found: {missing}"));
    }
}
