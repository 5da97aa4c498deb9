//! Order domain value types.
//!
//! All types are plain immutable values built from a backend payload and
//! dropped once the enclosing tool call completes. Numeric fields are kept
//! as [`serde_json::Number`] so that whatever the backend sent (integer or
//! float) serializes back unchanged.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Number;

// ============================================================================
// Order
// ============================================================================

/// A customer order at one back-order (suffix) level.
///
/// `skus` and `cartons` only hold items fulfilled at this suffix. Items moved
/// to a higher suffix live under that suffix's own `Order` in `split_orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// The main order number.
    #[schemars(with = "f64")]
    pub order_number: Number,

    /// The date the order was booked (ISO format).
    pub order_booked_date: String,

    /// The back-order level. Items that were out of stock when the order was
    /// booked move to a higher suffix and are delivered later.
    #[schemars(with = "f64")]
    pub order_suffix: Number,

    /// Status of the order.
    pub order_status: String,

    /// Full name of the order contact.
    pub order_contact_full_name: String,

    /// Email address of the contact.
    pub contact_email_address: String,

    /// Phone number of the contact.
    #[schemars(with = "f64")]
    pub contact_phone: Number,

    /// Ship-to identifier.
    #[schemars(with = "f64")]
    pub ship_to: Number,

    /// Ship-to name.
    pub ship_to_name: String,

    /// Orders this order has been split into. Some items go to the split
    /// order (commonly fulfilled elsewhere), the rest remain here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_orders: Option<Vec<Order>>,

    /// SKUs fulfilled at this suffix, excluding those of split orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skus: Option<Vec<Sku>>,

    /// Cartons shipped for this suffix. Each carton is delivered separately.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cartons: Option<Vec<Carton>>,
}

impl Order {
    /// Direct split orders, empty when the order never split.
    pub fn split_orders(&self) -> &[Order] {
        self.split_orders.as_deref().unwrap_or_default()
    }

    /// SKUs at this suffix level.
    pub fn skus(&self) -> &[Sku] {
        self.skus.as_deref().unwrap_or_default()
    }

    /// Cartons at this suffix level.
    pub fn cartons(&self) -> &[Carton] {
        self.cartons.as_deref().unwrap_or_default()
    }

    /// Depth-first walk over this order and its split orders.
    ///
    /// Orders nested deeper than `max_depth` below `self` are not visited.
    pub fn walk_splits(&self, max_depth: usize) -> SplitWalk<'_> {
        SplitWalk {
            stack: vec![(0, self)],
            max_depth,
        }
    }
}

/// Iterator returned by [`Order::walk_splits`], yielding `(depth, order)`.
#[derive(Debug)]
pub struct SplitWalk<'a> {
    stack: Vec<(usize, &'a Order)>,
    max_depth: usize,
}

impl<'a> Iterator for SplitWalk<'a> {
    type Item = (usize, &'a Order);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, order) = self.stack.pop()?;
        if depth < self.max_depth {
            self.stack
                .extend(order.split_orders().iter().rev().map(|child| (depth + 1, child)));
        }
        Some((depth, order))
    }
}

// ============================================================================
// Sku
// ============================================================================

/// A single order line. `order_number` + `order_suffix` point back at the
/// owning order; they are a key, not an ownership link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sku {
    /// The order number.
    #[schemars(with = "f64")]
    pub order_number: Number,

    /// The order suffix.
    #[schemars(with = "f64")]
    pub order_suffix: Number,

    /// The SKU identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// Quantity of the SKU picked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<f64>")]
    pub pick_qty: Option<Number>,
}

// ============================================================================
// Carton
// ============================================================================

/// A physical shipping unit with its delivery tracking data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Carton {
    /// The order number.
    #[schemars(with = "f64")]
    pub order_number: Number,

    /// The order suffix.
    #[schemars(with = "f64")]
    pub order_suffix: Number,

    /// The carton identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<f64>")]
    pub carton_id: Option<Number>,

    /// Delivery status description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_status_description: Option<String>,

    /// Expected date of delivery (ISO format).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_delivery_date: Option<String>,

    /// Date it was delivered (ISO format). Absent means not delivered yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_delivery_date: Option<String>,

    /// Carrier code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier_code: Option<String>,

    /// Name of the carrier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier_description: Option<String>,

    /// Link to track the package.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_and_trace_link: Option<String>,

    /// SKUs packed in this carton.
    pub skus: Vec<Sku>,
}

impl Carton {
    /// A carton counts as delivered once it has an actual delivery date.
    pub fn is_delivered(&self) -> bool {
        self.actual_delivery_date.is_some()
    }
}

// ============================================================================
// Product
// ============================================================================

/// Catalog metadata for one SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// The SKU identifier.
    pub sku: String,

    /// Human-readable product description.
    pub hfa_description: String,

    /// Manufacturer name.
    pub manufacturer_name: String,
}

/// Body of a product description lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ProductRequest {
    /// Array of SKU numbers to look up.
    pub skus: Vec<String>,
}
