//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - Dispatch of a (name, arguments) pair to exactly one tool handler
//! - Tool metadata for listing

use std::sync::Arc;
use tracing::{info, warn};

use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;

use super::context::ToolContext;
use super::definitions::{GetOrderEmailTool, GetOrderInfoTool, GetOrderOverviewTool, GetProductsTool};
use super::error::ToolError;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// Dispatch is stateless: the registry only holds the shared read-only
/// [`ToolContext`], so concurrent calls never interact.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    ctx: Arc<ToolContext>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            GetOrderInfoTool::NAME,
            GetOrderOverviewTool::NAME,
            GetOrderEmailTool::NAME,
            GetProductsTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    /// Both HTTP and STDIO/TCP transports use this to get tool metadata.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            GetOrderInfoTool::to_tool(),
            GetOrderOverviewTool::to_tool(),
            GetOrderEmailTool::to_tool(),
            GetProductsTool::to_tool(),
        ]
    }

    /// Dispatch a tool call to the matching handler.
    ///
    /// Arguments are validated before the handler runs. Backend failures never
    /// surface here; they are already folded into the returned result.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<CallToolResult, ToolError> {
        info!("Dispatching tool call: {}", name);

        match name {
            GetOrderInfoTool::NAME => GetOrderInfoTool::call(arguments, &self.ctx).await,
            GetOrderOverviewTool::NAME => GetOrderOverviewTool::call(arguments, &self.ctx).await,
            GetOrderEmailTool::NAME => GetOrderEmailTool::call(arguments, &self.ctx).await,
            GetProductsTool::NAME => GetProductsTool::call(arguments, &self.ctx).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::unknown_tool(name))
            }
        }
    }
}
