//! Order email tool.
//!
//! Fetches `/email/{orderNumber}` and hands the payload back verbatim as one
//! compact JSON text block.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::{CallToolResult, Tool},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{OrderNumberParams, parse_params, tool_model};
use crate::domains::backend::BackendRequest;
use crate::domains::tools::envelope;
use crate::domains::tools::policy::{ORDER_EMAIL, ToolPolicy};
use crate::domains::tools::{ToolContext, ToolError};

/// Order email tool - order rendered for an email body.
pub struct GetOrderEmailTool;

impl GetOrderEmailTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get-order-email";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get order information formatted as an email by order number";

    pub const POLICY: ToolPolicy = ORDER_EMAIL;

    #[instrument(skip_all, fields(order_number = %params.order_number))]
    pub async fn execute(params: &OrderNumberParams, ctx: &ToolContext) -> CallToolResult {
        info!("Fetching order email for {}", params.order_number);

        let request = BackendRequest::get(["email", params.order_number.as_str()]);
        let outcome = ctx.backend().fetch(request).await;

        envelope::respond(&Self::POLICY, Some(&params.order_number), outcome)
    }

    pub async fn call(arguments: Value, ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        let params: OrderNumberParams = parse_params(Self::NAME, arguments)?;
        Ok(Self::execute(&params, ctx).await)
    }

    pub fn to_tool() -> Tool {
        tool_model::<OrderNumberParams>(Self::NAME, Self::DESCRIPTION)
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(tool_ctx: Arc<ToolContext>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let tool_ctx = tool_ctx.clone();
            async move {
                Self::call(Value::Object(args), &tool_ctx)
                    .await
                    .map_err(McpError::from)
            }
            .boxed()
        })
    }
}
