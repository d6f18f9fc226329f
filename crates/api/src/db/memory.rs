//! In-memory product store.
//!
//! Keeps products in insertion order behind a `tokio::sync::RwLock`, so each
//! operation is atomic on its own just like a single-document database write.
//! Suitable for tests and local development; nothing survives a restart.

use async_trait::async_trait;
use catalog_core::{Product, ProductFilter, ProductId};
use regex::RegexBuilder;
use tokio::sync::RwLock;

use super::{ProductStore, StoreError};

/// Product store held entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    products: RwLock<Vec<Product>>,
}

impl MemoryProductStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        let name_regex = filter
            .name_pattern
            .as_deref()
            .map(|pattern| RegexBuilder::new(pattern).case_insensitive(true).build())
            .transpose()?;
        let limit = filter
            .limit
            .map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));

        let products = self.products.read().await;
        Ok(products
            .iter()
            .filter(|p| filter.admits_price(p.price))
            .filter(|p| name_regex.as_ref().is_none_or(|re| re.is_match(&p.name)))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == Some(id)).cloned())
    }

    async fn insert(&self, product: Product) -> Result<Product, StoreError> {
        let stored = product.with_id(ProductId::generate());
        self.products.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn replace(
        &self,
        id: ProductId,
        product: Product,
    ) -> Result<Option<Product>, StoreError> {
        let mut products = self.products.write().await;
        let Some(slot) = products.iter_mut().find(|p| p.id == Some(id)) else {
            return Ok(None);
        };
        *slot = product.with_id(id);
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != Some(id));
        Ok(products.len() < before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    async fn seeded() -> MemoryProductStore {
        let store = MemoryProductStore::new();
        for (name, cents) in [
            ("Blue Shirt", 1999),
            ("Red SHIRT", 12_000),
            ("Coffee Mug", 999),
            ("Tote Bag", 4500),
        ] {
            store
                .insert(Product::new(name, Decimal::new(cents, 2)))
                .await
                .unwrap();
        }
        store
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_ignores_payload_id() {
        let store = MemoryProductStore::new();
        let foreign = ProductId::generate();
        let stored = store
            .insert(Product::new("Mug", Decimal::ONE).with_id(foreign))
            .await
            .unwrap();

        let id = stored.id.unwrap();
        assert_ne!(id, foreign);
        assert_eq!(store.get(id).await.unwrap(), Some(stored));
        assert_eq!(store.get(foreign).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = seeded().await;
        let all = store.list(&ProductFilter::default()).await.unwrap();
        assert_eq!(
            names(&all),
            ["Blue Shirt", "Red SHIRT", "Coffee Mug", "Tote Bag"]
        );
    }

    #[tokio::test]
    async fn test_list_filters_combine() {
        let store = seeded().await;

        let filter = ProductFilter::from_params(Some("100"), None, None);
        let cheap = store.list(&filter).await.unwrap();
        assert_eq!(names(&cheap), ["Blue Shirt", "Coffee Mug", "Tote Bag"]);

        let filter = ProductFilter::from_params(None, Some("shirt"), None);
        let shirts = store.list(&filter).await.unwrap();
        assert_eq!(names(&shirts), ["Blue Shirt", "Red SHIRT"]);

        let filter = ProductFilter::from_params(Some("100"), Some("shirt"), None);
        let both = store.list(&filter).await.unwrap();
        assert_eq!(names(&both), ["Blue Shirt"]);
    }

    #[tokio::test]
    async fn test_list_limit() {
        let store = seeded().await;
        let filter = ProductFilter::from_params(None, None, Some("3"));
        assert_eq!(store.list(&filter).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_list_invalid_pattern_is_an_error() {
        let store = seeded().await;
        let filter = ProductFilter::from_params(None, Some("("), None);
        let err = store.list(&filter).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidPattern(_)));
    }

    #[tokio::test]
    async fn test_replace_keeps_id() {
        let store = seeded().await;
        let first = store.list(&ProductFilter::default()).await.unwrap()[0].clone();
        let id = first.id.unwrap();

        let replaced = store
            .replace(id, Product::new("Green Shirt", Decimal::TEN))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(replaced.id, Some(id));
        assert_eq!(store.get(id).await.unwrap().unwrap().name, "Green Shirt");
        assert_eq!(store.list(&ProductFilter::default()).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_replace_unchanged_content_still_matches() {
        let store = seeded().await;
        let first = store.list(&ProductFilter::default()).await.unwrap()[0].clone();
        let id = first.id.unwrap();

        let result = store.replace(id, first.clone()).await.unwrap();
        assert_eq!(result, Some(first));
    }

    #[tokio::test]
    async fn test_replace_missing() {
        let store = seeded().await;
        let result = store
            .replace(ProductId::generate(), Product::new("Ghost", Decimal::ONE))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let store = seeded().await;
        let id = store.list(&ProductFilter::default()).await.unwrap()[0]
            .id
            .unwrap();

        assert!(store.delete(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
        assert_eq!(store.list(&ProductFilter::default()).await.unwrap().len(), 3);
    }
}
