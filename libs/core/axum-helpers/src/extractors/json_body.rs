//! JSON body extractor with a uniform rejection.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub const EXPECTED_OBJECT: &str = "Request body must be a JSON object";

/// Like [`axum::Json`], but every rejection (syntax error, wrong field type,
/// missing `Content-Type`) becomes a 400 `INVALID_JSON` error response.
///
/// Only objects are decoded. Arrays and scalars are rejected before `T` sees
/// them, so a struct is never filled positionally from a sequence.
///
/// ```ignore
/// use axum_helpers::extractors::JsonBody;
///
/// async fn create(JsonBody(payload): JsonBody<ProductPayload>) -> impl IntoResponse {
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;

        let Value::Object(fields) = value else {
            return Err(AppError::InvalidJson(EXPECTED_OBJECT.to_string()));
        };

        decode(fields).map(JsonBody)
    }
}

fn decode<T: DeserializeOwned>(fields: Map<String, Value>) -> Result<T, AppError> {
    serde_json::from_value(Value::Object(fields)).map_err(|e| AppError::InvalidJson(e.to_string()))
}
