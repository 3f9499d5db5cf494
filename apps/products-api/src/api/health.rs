//! Banner and readiness endpoints

use axum::{extract::State, routing::get, Router};
use axum_helpers::{run_health_checks, HealthCheckFuture, ReadyResult};
use database::mongodb::check_health_detailed;

use crate::state::AppState;

pub const BANNER: &str = "Product Management API is running...";

async fn banner() -> &'static str {
    BANNER
}

/// 200 when MongoDB answers a ping, 503 otherwise
async fn ready(State(state): State<AppState>) -> ReadyResult {
    let client = state.mongo_client.clone();
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "mongodb",
        Box::pin(async move {
            let status = check_health_detailed(&client).await;
            if status.healthy {
                Ok(())
            } else {
                Err(status.message.unwrap_or_else(|| "ping failed".to_string()))
            }
        }),
    )];

    run_health_checks(checks).await
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/ready", get(ready))
        .with_state(state)
}
