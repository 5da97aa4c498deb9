//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Every tool forwards one call to the order-management backend and turns
//! the outcome into a `CallToolResult`.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - Dynamic ToolRouter builder for STDIO/TCP transport
//! - `registry.rs` - Central tool registry and name-based dispatch
//! - `policy.rs` - Per-tool failure/success handling table
//! - `envelope.rs` - Builds result envelopes from backend outcomes
//! - `context.rs` - Shared read-only state (config + backend capability)
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with params, `execute()`, `call()`
//!    and `create_route()`
//! 2. Add its policy to `policy.rs`
//! 3. Export in `definitions/mod.rs`
//! 4. Add route in `router.rs` and dispatch arm in `registry.rs`

mod context;
pub mod definitions;
pub mod envelope;
mod error;
pub mod policy;
mod registry;
pub mod router;

#[cfg(test)]
pub(crate) mod testing;

pub use context::ToolContext;
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
