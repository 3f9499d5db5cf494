//! Handler tests for Products domain
//!
//! These tests drive the products router over the in-memory repository:
//! - Request decoding and validation reasons
//! - `{message, data}` envelopes and status codes
//! - Error bodies
//! - Verb-named route aliases

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use axum_helpers::{Envelope, ErrorResponse, MessageResponse};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> Router {
    handlers::router(ProductService::new(InMemoryProductRepository::new()))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create(app: &Router, name: &str, weight: Value, price: Value) -> Product {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": name, "weight": weight, "price": price }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Envelope<Product> = json_body(response.into_body()).await;
    body.data
}

#[tokio::test]
async fn test_create_product_returns_201() {
    let app = app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "Rice", "weight": 5, "price": 1200 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Product added successfully");
    assert_eq!(body["data"]["name"], "Rice");
    assert_eq!(body["data"]["weight"], 5.0);
    assert_eq!(body["data"]["price"], 1200.0);
    assert_eq!(body["data"]["id"].as_str().unwrap().len(), 24);
    assert!(body["data"]["createdAt"].is_string());
    assert!(body["data"]["updatedAt"].is_string());
}

#[tokio::test]
async fn test_create_product_accepts_numeric_strings() {
    let app = app();
    let builder = TestDataBuilder::from_test_name("create_numeric_strings");

    let product = create(&app, &builder.product_name("bag"), json!("2.5"), json!("99")).await;

    assert_eq!(product.name, builder.product_name("bag"));
    assert_eq!(product.weight, 2.5);
    assert_eq!(product.price, 99.0);
}

#[tokio::test]
async fn test_create_product_reports_first_failing_rule() {
    let cases = [
        (json!({ "weight": 5, "price": 1 }), "name required"),
        (json!({ "name": "   ", "weight": 5, "price": 1 }), "name required"),
        (
            json!({ "name": "R1ce", "weight": 5, "price": 1200 }),
            "name must contain only letters",
        ),
        (
            json!({ "name": "R1ce", "weight": -1, "price": 0 }),
            "name must contain only letters",
        ),
        (
            json!({ "name": "Rice", "weight": 0, "price": 1200 }),
            "weight required and must be positive",
        ),
        (
            json!({ "name": "Rice", "weight": "5abc", "price": 1200 }),
            "weight required and must be positive",
        ),
        (
            json!({ "name": "Rice", "weight": 5 }),
            "price required and must be positive",
        ),
    ];

    for (payload, reason) in cases {
        let response = app()
            .oneshot(json_request("POST", "/", payload.clone()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{payload}");
        let body: ErrorResponse = json_body(response.into_body()).await;
        assert_eq!(body.error, "VALIDATION_ERROR");
        assert_eq!(body.message, reason, "{payload}");
    }
}

#[tokio::test]
async fn test_create_product_rejects_malformed_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": \"Rice\","))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.error, "INVALID_JSON");
}

#[tokio::test]
async fn test_create_product_rejects_non_object_body() {
    let app = app();

    for payload in [json!(["Rice", 5, 1200]), json!("Rice"), json!(5)] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/", payload.clone()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{payload}");
        let body: ErrorResponse = json_body(response.into_body()).await;
        assert_eq!(body.error, "INVALID_JSON");
    }

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();
    let body: Envelope<Vec<Product>> = json_body(response.into_body()).await;
    assert!(body.data.is_empty());
}

#[tokio::test]
async fn test_update_product_rejects_array_body() {
    let app = app();
    let created = create(&app, "Rice", json!(5), json!(1200)).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id),
            json!(["Rice Bag", 5, 1300]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.error, "INVALID_JSON");
}

#[tokio::test]
async fn test_list_products_in_insertion_order() {
    let app = app();

    let response = app.clone().oneshot(empty_request("GET", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Envelope<Vec<Product>> = json_body(response.into_body()).await;
    assert_eq!(body.message, "Found products");
    assert!(body.data.is_empty());

    for name in ["Rice", "Beans", "Apples"] {
        create(&app, name, json!(1), json!(1)).await;
    }

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();
    let body: Envelope<Vec<Product>> = json_body(response.into_body()).await;
    let names: Vec<_> = body.data.into_iter().map(|p| p.name).collect();
    assert_eq!(names, ["Rice", "Beans", "Apples"]);
}

#[tokio::test]
async fn test_get_product() {
    let app = app();
    let created = create(&app, "Rice", json!(5), json!(1200)).await;

    let response = app
        .oneshot(empty_request("GET", &format!("/{}", created.id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Envelope<Product> = json_body(response.into_body()).await;
    assert_eq!(body.message, "Found product");
    assert_eq!(body.data, created);
}

#[tokio::test]
async fn test_get_product_malformed_id_returns_400() {
    let response = app().oneshot(empty_request("GET", "/abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.error, "INVALID_OBJECT_ID");
    assert_eq!(body.message, "Invalid ID format");
}

#[tokio::test]
async fn test_get_product_missing_returns_404() {
    let builder = TestDataBuilder::from_test_name("get_missing");

    let response = app()
        .oneshot(empty_request("GET", &format!("/{}", builder.product_id())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.error, "NOT_FOUND");
    assert_eq!(body.message, "Product not found");
}

#[tokio::test]
async fn test_update_product_refreshes_updated_at() {
    let app = app();
    let created = create(&app, "Rice", json!(5), json!(1200)).await;

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id),
            json!({ "name": "Rice Bag", "weight": 5, "price": 1300 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Envelope<Product> = json_body(response.into_body()).await;
    assert_eq!(body.message, "Product updated successfully");
    assert_eq!(body.data.id, created.id);
    assert_eq!(body.data.name, "Rice Bag");
    assert_eq!(body.data.price, 1300.0);
    assert_eq!(body.data.created_at, created.created_at);
    assert!(body.data.updated_at > created.updated_at);

    let response = app
        .oneshot(empty_request("GET", &format!("/{}", created.id)))
        .await
        .unwrap();
    let body: Envelope<Product> = json_body(response.into_body()).await;
    assert_eq!(body.data.name, "Rice Bag");
}

#[tokio::test]
async fn test_update_product_error_precedence() {
    let app = app();
    let builder = TestDataBuilder::from_test_name("update_precedence");

    // malformed id before payload rules
    let response = app
        .clone()
        .oneshot(json_request("PUT", "/xyz", json!({ "name": "R1ce" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.error, "INVALID_OBJECT_ID");

    // payload rules before existence
    let uri = format!("/{}", builder.product_id());
    let response = app
        .clone()
        .oneshot(json_request("PUT", &uri, json!({ "name": "Rice", "weight": 5 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "price required and must be positive");

    let response = app
        .oneshot(json_request(
            "PUT",
            &uri,
            json!({ "name": "Rice", "weight": 5, "price": 10 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_product() {
    let app = app();
    let created = create(&app, "Rice", json!(5), json!(1200)).await;
    let uri = format!("/{}", created.id);

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: MessageResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "Product deleted successfully");

    let response = app
        .clone()
        .oneshot(empty_request("GET", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(empty_request("DELETE", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_product_malformed_id_returns_404() {
    let response = app()
        .oneshot(empty_request("DELETE", "/123"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "Product not found");
}

#[tokio::test]
async fn test_search_products() {
    let app = app();
    create(&app, "Brown Rice", json!(5), json!(1200)).await;
    create(&app, "Beans", json!(1), json!(300)).await;

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/search?query=rICE"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Envelope<Vec<Product>> = json_body(response.into_body()).await;
    assert_eq!(body.message, "Products found");
    assert_eq!(body.data.len(), 1);
    assert_eq!(body.data[0].name, "Brown Rice");

    let response = app
        .oneshot(empty_request("GET", "/search?query=lentils"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Envelope<Vec<Product>> = json_body(response.into_body()).await;
    assert_eq!(body.message, "No products found");
    assert!(body.data.is_empty());
}

#[tokio::test]
async fn test_search_requires_query() {
    for uri in ["/search", "/search?query="] {
        let response = app().oneshot(empty_request("GET", uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body: ErrorResponse = json_body(response.into_body()).await;
        assert_eq!(body.message, "query required");
    }
}

#[tokio::test]
async fn test_verb_named_aliases() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/addproduct",
            json!({ "name": "Rice", "weight": 5, "price": 1200 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Envelope<Product> = json_body(response.into_body()).await;
    let id = created.data.id;

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/getproducts"))
        .await
        .unwrap();
    let body: Envelope<Vec<Product>> = json_body(response.into_body()).await;
    assert_eq!(body.data.len(), 1);

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/getproduct/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/updateproduct/{id}"),
            json!({ "name": "Rice Bag", "weight": 5, "price": 1300 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/searchproducts?query=bag"))
        .await
        .unwrap();
    let body: Envelope<Vec<Product>> = json_body(response.into_body()).await;
    assert_eq!(body.data.len(), 1);

    let response = app
        .oneshot(empty_request("DELETE", &format!("/deleteproduct/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
