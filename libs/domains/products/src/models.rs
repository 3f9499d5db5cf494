use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A catalog entry as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// 24-character lowercase hex ObjectId
    #[schema(example = "65f1c0ffee0ddba11ad5eed5")]
    pub id: String,
    #[schema(example = "Rice")]
    pub name: String,
    #[schema(example = 5.0)]
    pub weight: f64,
    #[schema(example = 1200.0)]
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A numeric field as sent by clients: a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
}

impl From<f64> for NumberInput {
    fn from(value: f64) -> Self {
        NumberInput::Number(value)
    }
}

impl From<&str> for NumberInput {
    fn from(value: &str) -> Self {
        NumberInput::Text(value.to_string())
    }
}

/// Request body for create and update.
///
/// Every field is optional at the decoding stage so that missing values are
/// reported by validation with a field-specific reason. Unknown fields are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductPayload {
    #[schema(example = "Rice")]
    pub name: Option<String>,
    #[schema(value_type = Option<f64>, example = 5)]
    pub weight: Option<NumberInput>,
    #[schema(value_type = Option<f64>, example = 1200)]
    pub price: Option<NumberInput>,
}

impl ProductPayload {
    pub fn new(
        name: impl Into<String>,
        weight: impl Into<NumberInput>,
        price: impl Into<NumberInput>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            weight: Some(weight.into()),
            price: Some(price.into()),
        }
    }
}

/// Fields of a payload that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub weight: f64,
    pub price: f64,
}

/// `?query=` for name search
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive substring of the product name
    pub query: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_serializes_camel_case() {
        let now = Utc::now();
        let product = Product {
            id: "65f1c0ffee0ddba11ad5eed5".to_string(),
            name: "Rice".to_string(),
            weight: 5.0,
            price: 1200.0,
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["id"], "65f1c0ffee0ddba11ad5eed5");
        assert_eq!(value["weight"], 5.0);
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_payload_accepts_numbers_and_strings() {
        let payload: ProductPayload =
            serde_json::from_value(json!({"name": "Rice", "weight": 5, "price": "1200"})).unwrap();
        assert_eq!(payload.weight, Some(NumberInput::Number(5.0)));
        assert_eq!(payload.price, Some(NumberInput::Text("1200".to_string())));
    }

    #[test]
    fn test_payload_null_and_missing_are_absent() {
        let payload: ProductPayload =
            serde_json::from_value(json!({"name": null, "colour": "red"})).unwrap();
        assert_eq!(payload, ProductPayload::default());
    }

    #[test]
    fn test_payload_rejects_wrong_types() {
        assert!(serde_json::from_value::<ProductPayload>(json!({"weight": true})).is_err());
        assert!(serde_json::from_value::<ProductPayload>(json!({"name": 7})).is_err());
        assert!(serde_json::from_value::<ProductPayload>(json!(["Rice"])).is_err());
    }
}
