//! Schema validation errors.

use thiserror::Error;

/// A payload did not match the declared order schema.
///
/// Every variant but `Schema` carries the JSON path of the offending field,
/// e.g. `$.splitOrders[0].skus[2].orderNumber`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent.
    #[error("{path}: missing required field")]
    Missing { path: String },

    /// A field is present but does not match its declared shape.
    #[error("{path}: {message}")]
    Invalid { path: String, message: String },

    /// `splitOrders` nesting exceeds the traversal limit.
    #[error("{path}: split orders nested deeper than {limit} levels")]
    TooDeep { path: String, limit: usize },

    /// A generated schema failed to compile.
    #[error("invalid schema: {0}")]
    Schema(String),
}

impl ValidationError {
    /// JSON path of the field that failed.
    pub fn path(&self) -> &str {
        match self {
            Self::Missing { path } | Self::Invalid { path, .. } | Self::TooDeep { path, .. } => {
                path
            }
            Self::Schema(_) => "$",
        }
    }
}
