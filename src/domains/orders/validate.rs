//! Schema validation for order payloads.
//!
//! The JSON Schemas come from the typed model via `schemars` and are
//! compiled once with `jsonschema`. `splitOrders` is emitted as a `$ref`
//! into `$defs`, so the order schema refers to itself and the reference is
//! only followed while walking input.
//!
//! Numbers stay numbers and strings stay strings: nothing is coerced. A
//! missing or `null` optional field becomes `None`.

use std::sync::LazyLock;

use jsonschema::{Draft, Validator, error::ValidationErrorKind};
use schemars::{JsonSchema, schema_for};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ValidationError;
use super::model::{Order, Product};

type Result<T> = std::result::Result<T, ValidationError>;

/// Maximum `splitOrders` nesting accepted below a top-level order.
pub const MAX_SPLIT_DEPTH: usize = 32;

static ORDER: LazyLock<Result<Validator>> = LazyLock::new(compile::<Order>);
static ORDER_LIST: LazyLock<Result<Validator>> = LazyLock::new(compile::<Vec<Order>>);
static PRODUCT_LIST: LazyLock<Result<Validator>> = LazyLock::new(compile::<Vec<Product>>);

/// Validate a single order object.
pub fn validate_order(value: &Value) -> Result<Order> {
    check_split_depth(value, "$".to_string())?;
    check(&ORDER, value)?;
    decode(value)
}

/// Validate an array of order objects.
pub fn validate_order_list(value: &Value) -> Result<Vec<Order>> {
    if let Value::Array(orders) = value {
        for (i, order) in orders.iter().enumerate() {
            check_split_depth(order, format!("$[{i}]"))?;
        }
    }
    check(&ORDER_LIST, value)?;
    decode(value)
}

/// Validate an array of product descriptions.
pub fn validate_product_list(value: &Value) -> Result<Vec<Product>> {
    check(&PRODUCT_LIST, value)?;
    decode(value)
}

fn compile<T: JsonSchema>() -> Result<Validator> {
    let schema = serde_json::to_value(schema_for!(T))
        .map_err(|e| ValidationError::Schema(e.to_string()))?;
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .map_err(|e| ValidationError::Schema(e.to_string()))
}

/// Report the first schema violation in `value`, if any.
fn check(validator: &Result<Validator>, value: &Value) -> Result<()> {
    let validator = validator.as_ref().map_err(Clone::clone)?;
    let Some(err) = validator.iter_errors(value).next() else {
        return Ok(());
    };

    let path = json_path(err.instance_path.as_str());
    Err(match &err.kind {
        ValidationErrorKind::Required { property } => ValidationError::Missing {
            path: format!("{}.{}", path, property.as_str().unwrap_or_default()),
        },
        _ => ValidationError::Invalid {
            path,
            message: err.to_string(),
        },
    })
}

fn decode<T: DeserializeOwned>(value: &Value) -> Result<T> {
    serde_json::from_value(value.clone()).map_err(|e| ValidationError::Invalid {
        path: "$".to_string(),
        message: e.to_string(),
    })
}

/// Reject `splitOrders` chains deeper than [`MAX_SPLIT_DEPTH`] before the
/// schema walk recurses into them.
fn check_split_depth(order: &Value, root: String) -> Result<()> {
    let mut pending = vec![(0, root, order)];

    while let Some((depth, path, order)) = pending.pop() {
        if depth > MAX_SPLIT_DEPTH {
            return Err(ValidationError::TooDeep {
                path,
                limit: MAX_SPLIT_DEPTH,
            });
        }
        if let Some(Value::Array(splits)) = order.get("splitOrders") {
            for (i, split) in splits.iter().enumerate() {
                pending.push((depth + 1, format!("{path}.splitOrders[{i}]"), split));
            }
        }
    }

    Ok(())
}

/// JSON pointer (`/skus/0/sku`) to `$.skus[0].sku` notation.
fn json_path(pointer: &str) -> String {
    let mut path = String::from("$");
    for segment in pointer.split('/').skip(1) {
        let segment = segment.replace("~1", "/").replace("~0", "~");
        if segment.parse::<usize>().is_ok() {
            path.push_str(&format!("[{segment}]"));
        } else {
            path.push('.');
            path.push_str(&segment);
        }
    }
    path
}
