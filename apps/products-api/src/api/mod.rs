//! API routes module

pub mod health;
pub mod products;

use axum::Router;
use axum_helpers::server::{create_router, health_router};
use domain_products::{handlers, ProductRepository, ProductService};

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Resource routes, nested under `/api` by the router builder
pub fn routes<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    Router::new().nest("/products", handlers::router(service))
}

/// Banner, liveness and readiness, served at the root
pub fn ops(state: &AppState) -> Router {
    health_router(state.config.app).merge(health::router(state.clone()))
}

/// The complete application: docs, `/api` resources, ops routes and middleware
pub async fn app<R: ProductRepository + 'static>(
    service: ProductService<R>,
    state: &AppState,
) -> std::io::Result<Router> {
    create_router::<ApiDoc>(routes(service), ops(state)).await
}

/// Initialize database indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    products::init_indexes(state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::unreachable_state;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use domain_products::InMemoryProductRepository;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn assembled() -> Router {
        let service = ProductService::new(InMemoryProductRepository::new());
        app(service, &unreachable_state().await).await.unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_products_served_under_api_prefix() {
        let app = assembled().await;

        let request = Request::builder()
            .method("POST")
            .uri("/api/products")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "name": "Rice", "weight": 5, "price": 1200 }).to_string(),
            ))
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(&app, get(&format!("/api/products/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Rice");

        let (status, body) = send(&app, get("/api/products/getproducts")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let (status, body) = send(&app, get("/api/products/search?query=ric")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Products found");

        let (status, _) = send(&app, get("/products")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_ops_routes_share_middleware() {
        let app = assembled().await;

        for uri in ["/", "/health", "/api/products"] {
            let response = app.clone().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert_eq!(
                response.headers().get("x-content-type-options").unwrap(),
                "nosniff",
                "{uri}"
            );
        }

        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["name"], "products_api");
    }

    #[tokio::test]
    async fn test_unknown_route_and_method() {
        let app = assembled().await;

        let (status, body) = send(&app, get("/api/nothing")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");

        let request = Request::builder()
            .method("PATCH")
            .uri("/api/products")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
