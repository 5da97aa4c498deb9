//! Order tools module.
//!
//! One file per tool, each forwarding a single call to the order-management
//! backend:
//! - `order_info`: `get-order-info` (order detail, structured)
//! - `order_overview`: `get-order-overview` (order overview, structured)
//! - `order_email`: `get-order-email` (email rendering, text)
//! - `products`: `get-products` (product descriptions, text)

pub mod common;
pub mod order_email;
pub mod order_info;
pub mod order_overview;
pub mod products;

pub use common::OrderNumberParams;
pub use order_email::GetOrderEmailTool;
pub use order_info::GetOrderInfoTool;
pub use order_overview::GetOrderOverviewTool;
pub use products::GetProductsTool;
