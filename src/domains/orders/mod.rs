//! Orders domain module.
//!
//! Describes the hierarchical order/shipment data returned by the backend
//! and validates raw JSON against it.
//!
//! ## Architecture
//!
//! - `model.rs` - `Order`, `Sku`, `Carton` and `Product` value types
//! - `validate.rs` - `jsonschema` validators compiled from the model's schemas
//! - `error.rs` - `ValidationError`
//!
//! `Order` is self-referential through `splitOrders`. The typed model
//! derives `JsonSchema`, which emits the recursion as a `$ref`, so the same
//! types describe the declared shape to MCP clients (see the resources
//! domain).

mod error;
mod model;
mod validate;

pub use error::ValidationError;
pub use model::{Carton, Order, Product, ProductRequest, Sku, SplitWalk};
pub use validate::{MAX_SPLIT_DEPTH, validate_order, validate_order_list, validate_product_list};
