//! Integration tests for Products domain
//!
//! These tests use a real MongoDB via testcontainers to ensure:
//! - Documents round-trip through the stored shape
//! - Name search is case-insensitive and literal
//! - Updates return the post-update document
//!
//! They need a Docker daemon: `cargo test -- --ignored`.

use domain_products::*;
use ::mongodb::bson::{doc, Document};
use test_utils::{assertions::*, TestDataBuilder, TestMongo};

fn draft(name: &str, weight: f64, price: f64) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        weight,
        price,
    }
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_insert_and_find_by_id() {
    let mongo = TestMongo::new().await;
    let repo = MongoProductRepository::new(&mongo.database());
    let builder = TestDataBuilder::from_test_name("insert_and_find");

    let created = repo
        .insert(draft(&builder.product_name("main"), 5.0, 1200.0))
        .await
        .unwrap();

    assert_object_id(&created.id, "created id");
    assert_eq!(created.created_at, created.updated_at);

    let found = repo.find_by_id(&created.id).await.unwrap();
    let found = assert_some(found, "product should exist");
    assert_eq!(found.name, builder.product_name("main"));
    assert_close(found.price, 1200.0, "price");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_stored_document_shape() {
    let mongo = TestMongo::new().await;
    let db = mongo.database();
    let repo = MongoProductRepository::new(&db);

    let created = repo.insert(draft("Rice", 5.0, 1200.0)).await.unwrap();

    let raw = db
        .collection::<Document>("products")
        .find_one(doc! {})
        .await
        .unwrap()
        .unwrap();
    assert_eq!(raw.get_object_id("_id").unwrap().to_hex(), created.id);
    assert_eq!(raw.get_str("name").unwrap(), "Rice");
    assert!(raw.get_datetime("createdAt").is_ok());
    assert!(raw.get_datetime("updatedAt").is_ok());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_all_and_search() {
    let mongo = TestMongo::new().await;
    let repo = MongoProductRepository::new(&mongo.database());
    repo.init_indexes().await.unwrap();

    for name in ["Brown Rice", "Beans", "Rice Bag"] {
        repo.insert(draft(name, 1.0, 1.0)).await.unwrap();
    }

    let names: Vec<_> = repo
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, ["Brown Rice", "Beans", "Rice Bag"]);

    assert_eq!(repo.find_by_name_pattern("RICE").await.unwrap().len(), 2);
    assert!(repo.find_by_name_pattern(".*").await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_returns_new_document() {
    let mongo = TestMongo::new().await;
    let repo = MongoProductRepository::new(&mongo.database());

    let created = repo.insert(draft("Rice", 5.0, 1200.0)).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let updated = repo
        .update(&created.id, draft("Rice Bag", 5.0, 1300.0))
        .await
        .unwrap();
    let updated = assert_some(updated, "update should match");

    assert_eq!(updated.name, "Rice Bag");
    assert_close(updated.price, 1300.0, "price");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_immediate_update_moves_updated_at_forward() {
    let mongo = TestMongo::new().await;
    let repo = MongoProductRepository::new(&mongo.database());

    let created = repo.insert(draft("Rice", 5.0, 1200.0)).await.unwrap();
    let updated = repo
        .update(&created.id, draft("Rice Bag", 5.0, 1300.0))
        .await
        .unwrap();
    let updated = assert_some(updated, "update should match");

    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_and_delete_missing() {
    let mongo = TestMongo::new().await;
    let repo = MongoProductRepository::new(&mongo.database());
    let builder = TestDataBuilder::from_test_name("missing");

    let missing = builder.product_id();
    assert!(repo.update(&missing, draft("Rice", 1.0, 1.0)).await.unwrap().is_none());
    assert!(!repo.delete(&missing).await.unwrap());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete() {
    let mongo = TestMongo::new().await;
    let repo = MongoProductRepository::new(&mongo.database());

    let created = repo.insert(draft("Rice", 5.0, 1200.0)).await.unwrap();

    assert!(repo.delete(&created.id).await.unwrap());
    assert!(repo.find_by_id(&created.id).await.unwrap().is_none());
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_service_over_mongo() {
    let mongo = TestMongo::new().await;
    let service = ProductService::new(MongoProductRepository::new(&mongo.database()));

    let created = service
        .create_product(ProductPayload::new("Rice", "5", 1200.0))
        .await
        .unwrap();

    let fetched = service.get_product(&created.id).await.unwrap();
    assert_eq!(fetched.id, created.id);

    service.delete_product(&created.id).await.unwrap();
    assert!(matches!(
        service.get_product(&created.id).await,
        Err(ProductError::NotFound(_))
    ));
}
