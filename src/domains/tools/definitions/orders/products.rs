//! Product description tool.
//!
//! POSTs the SKU list to `/product_descriptions/` and returns the response
//! pretty-printed as a single text block. Never sets `isError`.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::{CallToolResult, Tool},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::common::{parse_params, tool_model};
use crate::domains::backend::BackendRequest;
use crate::domains::orders::{ProductRequest, validate_product_list};
use crate::domains::tools::envelope;
use crate::domains::tools::policy::{PRODUCTS, ToolPolicy};
use crate::domains::tools::{ToolContext, ToolError};

/// Product lookup tool - descriptions and manufacturers by SKU.
pub struct GetProductsTool;

impl GetProductsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get-products";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get product information by SKU numbers";

    pub const POLICY: ToolPolicy = PRODUCTS;

    #[instrument(skip_all, fields(sku_count = params.skus.len()))]
    pub async fn execute(params: &ProductRequest, ctx: &ToolContext) -> CallToolResult {
        info!("Looking up {} product(s)", params.skus.len());

        let request = BackendRequest::post(
            ["product_descriptions", ""],
            json!({ "skus": params.skus }),
        );
        let outcome = ctx.backend().fetch(request).await;

        if let Ok(payload) = &outcome {
            match validate_product_list(payload) {
                Ok(products) => debug!("Backend described {} product(s)", products.len()),
                Err(e) => warn!("Product payload does not match the product schema: {}", e),
            }
        }

        envelope::respond(&Self::POLICY, None, outcome)
    }

    pub async fn call(arguments: Value, ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        let params: ProductRequest = parse_params(Self::NAME, arguments)?;
        Ok(Self::execute(&params, ctx).await)
    }

    pub fn to_tool() -> Tool {
        tool_model::<ProductRequest>(Self::NAME, Self::DESCRIPTION)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::backend::{BackendError, Method};
    use crate::domains::tools::testing::{FakeBackend, context, texts};

    fn request(skus: &[&str]) -> ProductRequest {
        ProductRequest {
            skus: skus.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_posts_skus_and_pretty_prints_response() {
        let payload = json!([
            {"sku": "A1", "hfaDescription": "Claw hammer", "manufacturerName": "Acme"},
            {"sku": "B2", "hfaDescription": "Box of nails", "manufacturerName": "Acme"}
        ]);
        let backend = FakeBackend::ok(payload.clone());
        let result = GetProductsTool::execute(&request(&["A1", "B2"]), &context(backend.clone())).await;

        assert_eq!(result.is_error, Some(false));
        assert_eq!(
            texts(&result),
            vec![serde_json::to_string_pretty(&payload).unwrap()]
        );

        let requests = backend.requests();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].path(), "/product_descriptions/");
        assert_eq!(requests[0].body, Some(json!({"skus": ["A1", "B2"]})));
    }

    #[tokio::test]
    async fn test_unexpected_shape_still_returned() {
        let payload = json!({"message": "no products"});
        let backend = FakeBackend::ok(payload.clone());
        let result = GetProductsTool::execute(&request(&["Z9"]), &context(backend)).await;

        assert_eq!(
            texts(&result),
            vec![serde_json::to_string_pretty(&payload).unwrap()]
        );
    }

    #[tokio::test]
    async fn test_failures_never_flagged() {
        let backend = FakeBackend::failing(BackendError::status(404));
        let result = GetProductsTool::execute(&request(&["A1"]), &context(backend)).await;
        assert_eq!(result.is_error, None);
        assert_eq!(
            texts(&result),
            vec!["Error fetching products: 404 Not Found".to_string()]
        );

        let backend = FakeBackend::failing(BackendError::Transport("connection reset".into()));
        let result = GetProductsTool::execute(&request(&["A1"]), &context(backend)).await;
        assert_eq!(result.is_error, None);
        assert_eq!(
            texts(&result),
            vec!["Failed to fetch product information: connection reset".to_string()]
        );
    }

    #[tokio::test]
    async fn test_call_rejects_non_array_skus() {
        let backend = FakeBackend::ok(json!([]));
        let ctx = context(backend.clone());

        assert!(GetProductsTool::call(json!({"skus": "A1"}), &ctx).await.is_err());
        assert!(GetProductsTool::call(json!({"skus": [1, 2]}), &ctx).await.is_err());
        assert!(backend.requests().is_empty());
    }
}
