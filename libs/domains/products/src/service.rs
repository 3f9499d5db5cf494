//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductPayload};
use crate::repository::ProductRepository;
use crate::validation::{is_valid_id, validate};

pub const QUERY_REQUIRED: &str = "query required";

/// Validates requests and maps store outcomes onto [`ProductError`].
///
/// Each operation makes at most one repository call.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, payload))]
    pub async fn create_product(&self, payload: ProductPayload) -> ProductResult<Product> {
        let draft = validate(&payload)
            .into_result()
            .map_err(|reason| ProductError::Validation(reason.to_string()))?;

        let product = self.repository.insert(draft).await?;
        tracing::info!(product_id = %product.id, "Product added");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> ProductResult<Product> {
        if !is_valid_id(id) {
            return Err(ProductError::MalformedId(id.to_string()));
        }

        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Id format, then payload rules, then existence.
    #[instrument(skip(self, payload))]
    pub async fn update_product(&self, id: &str, payload: ProductPayload) -> ProductResult<Product> {
        if !is_valid_id(id) {
            return Err(ProductError::MalformedId(id.to_string()));
        }

        let draft = validate(&payload)
            .into_result()
            .map_err(|reason| ProductError::Validation(reason.to_string()))?;

        let product = self
            .repository
            .update(id, draft)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;

        tracing::info!(product_id = %product.id, "Product updated");
        Ok(product)
    }

    /// A malformed id names no product and is reported as not found.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<()> {
        if !is_valid_id(id) || !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id.to_string()));
        }

        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn search_products(&self, query: Option<&str>) -> ProductResult<Vec<Product>> {
        match query {
            Some(q) if !q.is_empty() => self.repository.find_by_name_pattern(q).await,
            _ => Err(ProductError::Validation(QUERY_REQUIRED.to_string())),
        }
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
