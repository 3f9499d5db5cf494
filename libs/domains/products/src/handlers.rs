//! HTTP handlers for Products API

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestJsonResponse, BadRequestObjectIdResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
    Envelope, JsonBody, MessageResponse,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{NumberInput, Product, ProductPayload, SearchQuery};
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const MSG_CREATED: &str = "Product added successfully";
pub const MSG_LISTED: &str = "Found products";
pub const MSG_FOUND: &str = "Found product";
pub const MSG_UPDATED: &str = "Product updated successfully";
pub const MSG_DELETED: &str = "Product deleted successfully";
pub const MSG_SEARCH_HIT: &str = "Products found";
pub const MSG_SEARCH_MISS: &str = "No products found";

type SharedService<R> = State<Arc<ProductService<R>>>;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        search_products,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(Product, ProductPayload, NumberInput, MessageResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestObjectIdResponse,
            BadRequestJsonResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Products router, meant to be nested at `/products`.
///
/// Besides the resource routes it serves the verb-named aliases used by the
/// single-page frontend (`/getproducts`, `/addproduct`, ...).
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", get(search_products))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .merge(legacy_routes())
        .with_state(shared_service)
}

fn legacy_routes<R: ProductRepository + 'static>() -> Router<Arc<ProductService<R>>> {
    Router::new()
        .route("/getproducts", get(list_products))
        .route("/getproduct/{id}", get(get_product))
        .route("/addproduct", post(create_product))
        .route("/updateproduct/{id}", put(update_product))
        .route("/deleteproduct/{id}", delete(delete_product))
        .route("/searchproducts", get(search_products))
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "All products in insertion order", body = Envelope<Vec<Product>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): SharedService<R>,
) -> ProductResult<Envelope<Vec<Product>>> {
    let products = service.list_products().await?;
    Ok(Envelope::new(MSG_LISTED, products))
}

/// Create a product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Product created", body = Envelope<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): SharedService<R>,
    JsonBody(payload): JsonBody<ProductPayload>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(payload).await?;
    Ok(Envelope::new(MSG_CREATED, product).with_status(StatusCode::CREATED))
}

/// Search products by name
#[utoipa::path(
    get,
    path = "/search",
    tag = "Products",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching products, possibly none", body = Envelope<Vec<Product>>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_products<R: ProductRepository>(
    State(service): SharedService<R>,
    Query(params): Query<SearchQuery>,
) -> ProductResult<Envelope<Vec<Product>>> {
    let products = service.search_products(params.query.as_deref()).await?;
    let message = if products.is_empty() {
        MSG_SEARCH_MISS
    } else {
        MSG_SEARCH_HIT
    };
    Ok(Envelope::new(message, products))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "24-character hex ObjectId")
    ),
    responses(
        (status = 200, description = "Product found", body = Envelope<Product>),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): SharedService<R>,
    Path(id): Path<String>,
) -> ProductResult<Envelope<Product>> {
    let product = service.get_product(&id).await?;
    Ok(Envelope::new(MSG_FOUND, product))
}

/// Replace a product's name, weight and price
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "24-character hex ObjectId")
    ),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Product updated", body = Envelope<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): SharedService<R>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<ProductPayload>,
) -> ProductResult<Envelope<Product>> {
    let product = service.update_product(&id, payload).await?;
    Ok(Envelope::new(MSG_UPDATED, product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "24-character hex ObjectId")
    ),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): SharedService<R>,
    Path(id): Path<String>,
) -> ProductResult<MessageResponse> {
    service.delete_product(&id).await?;
    Ok(MessageResponse::new(MSG_DELETED))
}
