use super::{ResourceDefinition, render_schema};
use crate::domains::orders::Product;
use crate::domains::resources::ResourceError;

/// JSON Schema of the product descriptions returned by get-products.
pub struct ProductListSchemaResource;

impl ResourceDefinition for ProductListSchemaResource {
    const URI: &'static str = "schema://orders/product-list";
    const NAME: &'static str = "Product List Schema";
    const DESCRIPTION: &'static str = "JSON Schema of the product list returned by get-products";
    const MIME_TYPE: &'static str = "application/schema+json";

    fn render() -> Result<String, ResourceError> {
        render_schema::<Vec<Product>>(Self::URI)
    }
}
