use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{Product, ProductDraft};

/// Document store for products.
///
/// Identifiers are 24-character hex strings. Implementations treat an
/// identifier they cannot parse as one that names no document.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Store a new product; the store assigns the id and both timestamps
    async fn insert(&self, draft: ProductDraft) -> ProductResult<Product>;

    /// Every product in natural (insertion) order
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>>;

    /// Products whose name contains `query`, literally and ignoring case
    async fn find_by_name_pattern(&self, query: &str) -> ProductResult<Vec<Product>>;

    /// Replace name, weight and price and refresh `updatedAt`.
    ///
    /// Returns the updated product, or `None` when nothing matched.
    async fn update(&self, id: &str, draft: ProductDraft) -> ProductResult<Option<Product>>;

    /// Returns whether a document was removed
    async fn delete(&self, id: &str) -> ProductResult<bool>;
}
