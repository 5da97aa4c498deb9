//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod orders;

pub use orders::{
    GetOrderEmailTool, GetOrderInfoTool, GetOrderOverviewTool, GetProductsTool, OrderNumberParams,
};
