//! Resource-specific error types.

use thiserror::Error;

/// Errors that can occur during resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The requested resource was not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The resource content could not be rendered.
    #[error("Failed to render resource {uri}: {source}")]
    Render {
        uri: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ResourceError {
    /// Create a new "not found" error.
    pub fn not_found(uri: impl Into<String>) -> Self {
        Self::NotFound(uri.into())
    }

    pub fn render(uri: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Render {
            uri: uri.into(),
            source,
        }
    }

    /// Whether the caller asked for a URI nobody serves.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ResourceError::not_found("schema://orders/missing");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Resource not found: schema://orders/missing");
    }
}
