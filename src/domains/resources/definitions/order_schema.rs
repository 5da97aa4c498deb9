//! Schema of the structured content returned by the order detail tools.

use super::{ResourceDefinition, render_schema};
use crate::domains::orders::Order;
use crate::domains::resources::ResourceError;

/// JSON Schema of a list of orders, split orders included.
pub struct OrderListSchemaResource;

impl ResourceDefinition for OrderListSchemaResource {
    const URI: &'static str = "schema://orders/order-list";
    const NAME: &'static str = "Order List Schema";
    const DESCRIPTION: &'static str =
        "JSON Schema of the order list returned as structured content by get-order-info and get-order-overview";
    const MIME_TYPE: &'static str = "application/schema+json";

    fn render() -> Result<String, ResourceError> {
        render_schema::<Vec<Order>>(Self::URI)
    }
}
