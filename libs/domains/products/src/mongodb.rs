//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, Document},
    options::{IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{Product, ProductDraft};
use crate::repository::ProductRepository;

pub const COLLECTION: &str = "products";

/// Stored shape: `{_id, name, weight, price, createdAt, updatedAt}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    weight: f64,
    price: f64,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

fn to_chrono(dt: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(dt.timestamp_millis()).unwrap_or_default()
}

impl From<ProductDocument> for Product {
    fn from(doc: ProductDocument) -> Self {
        Product {
            id: doc.id.to_hex(),
            name: doc.name,
            weight: doc.weight,
            price: doc.price,
            created_at: to_chrono(doc.created_at),
            updated_at: to_chrono(doc.updated_at),
        }
    }
}

/// `{"_id": oid}`, or `None` when `id` cannot name any document
fn id_filter(id: &str) -> Option<Document> {
    ObjectId::parse_str(id).ok().map(|oid| doc! { "_id": oid })
}

/// Pipeline update replacing the editable fields.
///
/// `updatedAt` becomes the server's `$$NOW`, but never less than one
/// millisecond past its previous value, so an update landing in the same
/// millisecond as the insert still moves it forward.
fn update_pipeline(draft: ProductDraft) -> Vec<Document> {
    vec![doc! {
        "$set": {
            "name": { "$literal": draft.name },
            "weight": draft.weight,
            "price": draft.price,
            "updatedAt": { "$max": ["$$NOW", { "$add": ["$updatedAt", 1_i64] }] },
        }
    }]
}

/// Case-insensitive substring match with regex metacharacters escaped
fn name_filter(query: &str) -> Document {
    doc! { "name": { "$regex": regex::escape(query), "$options": "i" } }
}

pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<ProductDocument>(collection_name);
        Self { collection }
    }

    /// Index on `name` for search. Idempotent.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder().name("idx_name".to_string()).build())
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    async fn collect(&self, filter: Document) -> ProductResult<Vec<Product>> {
        let cursor = self.collection.find(filter).await?;
        let documents: Vec<ProductDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(Product::from).collect())
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, draft), fields(product_name = %draft.name))]
    async fn insert(&self, draft: ProductDraft) -> ProductResult<Product> {
        let now = bson::DateTime::now();
        let document = ProductDocument {
            id: ObjectId::new(),
            name: draft.name,
            weight: draft.weight,
            price: draft.price,
            created_at: now,
            updated_at: now,
        };

        self.collection.insert_one(&document).await?;

        tracing::info!(product_id = %document.id, "Product created");
        Ok(document.into())
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        self.collect(doc! {}).await
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        let Some(filter) = id_filter(id) else {
            return Ok(None);
        };
        let document = self.collection.find_one(filter).await?;
        Ok(document.map(Product::from))
    }

    #[instrument(skip(self))]
    async fn find_by_name_pattern(&self, query: &str) -> ProductResult<Vec<Product>> {
        self.collect(name_filter(query)).await
    }

    #[instrument(skip(self, draft))]
    async fn update(&self, id: &str, draft: ProductDraft) -> ProductResult<Option<Product>> {
        let Some(filter) = id_filter(id) else {
            return Ok(None);
        };

        let document = self
            .collection
            .find_one_and_update(filter, update_pipeline(draft))
            .return_document(ReturnDocument::After)
            .await?;

        if document.is_some() {
            tracing::info!(product_id = %id, "Product updated");
        }
        Ok(document.map(Product::from))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> ProductResult<bool> {
        let Some(filter) = id_filter(id) else {
            return Ok(false);
        };

        let result = self.collection.delete_one(filter).await?;
        let deleted = result.deleted_count > 0;
        if deleted {
            tracing::info!(product_id = %id, "Product deleted");
        }
        Ok(deleted)
    }
}
