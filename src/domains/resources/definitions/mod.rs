//! Resource definitions module.
//!
//! Each resource is defined in its own file with its URI, metadata and a
//! content renderer.
//!
//! ## Adding a New Resource
//!
//! 1. Create a new file (e.g., `my_resource.rs`)
//! 2. Implement the `ResourceDefinition` trait
//! 3. Export it here
//! 4. Register in `registry.rs`

mod order_schema;
mod product_schema;

pub use order_schema::OrderListSchemaResource;
pub use product_schema::ProductListSchemaResource;

use super::error::ResourceError;

/// Trait for resource definitions.
///
/// Each resource must implement this trait to provide its metadata and content.
pub trait ResourceDefinition {
    /// The unique URI of the resource.
    const URI: &'static str;

    /// The display name of the resource.
    const NAME: &'static str;

    /// A description of the resource.
    const DESCRIPTION: &'static str;

    /// The MIME type of the resource content.
    const MIME_TYPE: &'static str;

    /// Render the resource body.
    fn render() -> Result<String, ResourceError>;
}

/// Pretty-print the JSON Schema of `T` as the body of resource `uri`.
pub(crate) fn render_schema<T: schemars::JsonSchema>(uri: &str) -> Result<String, ResourceError> {
    let schema = schemars::schema_for!(T);
    serde_json::to_string_pretty(&schema).map_err(|e| ResourceError::render(uri, e))
}
