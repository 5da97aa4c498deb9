//! Domains module containing business logic organized by bounded contexts.
//!
//! - `orders` - order, carton, SKU and product value types plus validation
//! - `backend` - the order-management backend capability
//! - `tools` - MCP tools built on top of the backend
//! - `resources` - schema resources describing tool output

pub mod backend;
pub mod orders;
pub mod resources;
pub mod tools;
