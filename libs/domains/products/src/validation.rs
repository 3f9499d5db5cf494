//! Field rules for product payloads and document identifiers.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::{NumberInput, ProductDraft, ProductPayload};

pub const NAME_REQUIRED: &str = "name required";
pub const NAME_LETTERS_ONLY: &str = "name must contain only letters";
pub const WEIGHT_INVALID: &str = "weight required and must be positive";
pub const PRICE_INVALID: &str = "price required and must be positive";

static OBJECT_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").unwrap());

static LETTERS_AND_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+$").unwrap());

/// `true` iff `id` is exactly 24 hex digits, either case.
pub fn is_valid_id(id: &str) -> bool {
    OBJECT_ID.is_match(id)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Valid(ProductDraft),
    Invalid(&'static str),
}

impl ValidationResult {
    pub fn into_result(self) -> Result<ProductDraft, &'static str> {
        match self {
            ValidationResult::Valid(draft) => Ok(draft),
            ValidationResult::Invalid(reason) => Err(reason),
        }
    }
}

/// Strict numeric parsing shared by create and update.
///
/// Strings must be a complete finite decimal once trimmed: `"12.5"` parses,
/// `"5abc"`, `""`, `"NaN"` and `"inf"` do not.
pub fn parse_number(input: &NumberInput) -> Option<f64> {
    let value = match input {
        NumberInput::Number(n) => *n,
        NumberInput::Text(s) => s.trim().parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

fn positive(input: Option<&NumberInput>) -> Option<f64> {
    input.and_then(parse_number).filter(|v| *v > 0.0)
}

/// Check `payload` against the product rules; the first failing rule wins.
pub fn validate(payload: &ProductPayload) -> ValidationResult {
    let name = match payload.name.as_deref() {
        Some(name) if !name.trim().is_empty() => name,
        _ => return ValidationResult::Invalid(NAME_REQUIRED),
    };

    if !LETTERS_AND_SPACES.is_match(name) {
        return ValidationResult::Invalid(NAME_LETTERS_ONLY);
    }

    let Some(weight) = positive(payload.weight.as_ref()) else {
        return ValidationResult::Invalid(WEIGHT_INVALID);
    };

    let Some(price) = positive(payload.price.as_ref()) else {
        return ValidationResult::Invalid(PRICE_INVALID);
    };

    ValidationResult::Valid(ProductDraft {
        name: name.to_string(),
        weight,
        price,
    })
}
