//! In-process implementation of ProductRepository for development and tests

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{Product, ProductDraft};
use crate::repository::ProductRepository;

/// Keeps products in insertion order behind a `RwLock`.
///
/// Clones share the same storage.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

/// Now, or one millisecond past `previous` when the clock has not moved on
fn next_updated_at(previous: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(previous + TimeDelta::milliseconds(1))
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    #[instrument(skip(self, draft), fields(product_name = %draft.name))]
    async fn insert(&self, draft: ProductDraft) -> ProductResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: ObjectId::new().to_hex(),
            name: draft.name,
            weight: draft.weight,
            price: draft.price,
            created_at: now,
            updated_at: now,
        };

        self.products.write().await.push(product.clone());
        Ok(product)
    }

    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id.eq_ignore_ascii_case(id)).cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_name_pattern(&self, query: &str) -> ProductResult<Vec<Product>> {
        let needle = query.to_lowercase();
        let products = self.products.read().await;
        Ok(products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    #[instrument(skip(self, draft))]
    async fn update(&self, id: &str, draft: ProductDraft) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;
        let Some(product) = products.iter_mut().find(|p| p.id.eq_ignore_ascii_case(id)) else {
            return Ok(None);
        };

        product.name = draft.name;
        product.weight = draft.weight;
        product.price = draft.price;
        product.updated_at = next_updated_at(product.updated_at);

        Ok(Some(product.clone()))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> ProductResult<bool> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| !p.id.eq_ignore_ascii_case(id));
        Ok(products.len() < before)
    }
}
