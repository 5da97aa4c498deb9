//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! This module builds the ToolRouter for STDIO/TCP transport by delegating
//! to the tool definitions themselves. Each tool knows how to create its own route.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::context::ToolContext;
use super::definitions::{GetOrderEmailTool, GetOrderInfoTool, GetOrderOverviewTool, GetProductsTool};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(ctx: Arc<ToolContext>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(GetOrderInfoTool::create_route(ctx.clone()))
        .with_route(GetOrderOverviewTool::create_route(ctx.clone()))
        .with_route(GetOrderEmailTool::create_route(ctx.clone()))
        .with_route(GetProductsTool::create_route(ctx))
}
