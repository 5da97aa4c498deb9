//! Order detail tool.
//!
//! Fetches `/order_detail/{orderNumber}` and returns the order(s) as
//! structured content. Failures are flagged with `isError`.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::{CallToolResult, Tool},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::common::{OrderNumberParams, parse_params, tool_model};
use crate::domains::backend::{BackendError, BackendRequest};
use crate::domains::orders::{MAX_SPLIT_DEPTH, Order, validate_order_list};
use crate::domains::tools::envelope::{self, normalize_to_list};
use crate::domains::tools::policy::{ORDER_INFO, ToolPolicy};
use crate::domains::tools::{ToolContext, ToolError};

/// Order detail tool - full order hierarchy with splits, SKUs and cartons.
pub struct GetOrderInfoTool;

impl GetOrderInfoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get-order-info";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get detailed order information by order number";

    pub const POLICY: ToolPolicy = ORDER_INFO;

    /// Execute the tool logic.
    #[instrument(skip_all, fields(order_number = %params.order_number))]
    pub async fn execute(params: &OrderNumberParams, ctx: &ToolContext) -> CallToolResult {
        info!("Fetching order detail for {}", params.order_number);

        let request = BackendRequest::get(["order_detail", params.order_number.as_str()]);
        let outcome = ctx
            .backend()
            .fetch(request)
            .await
            .map(normalize_to_list)
            .and_then(|orders| Self::check_orders(orders, ctx));

        envelope::respond(&Self::POLICY, Some(&params.order_number), outcome)
    }

    /// Validate the order list against the schema.
    ///
    /// With strict validation off a mismatch is only logged and the payload
    /// passes through untouched.
    fn check_orders(orders: Value, ctx: &ToolContext) -> Result<Value, BackendError> {
        match validate_order_list(&orders) {
            Ok(parsed) => {
                let (levels, delivered, cartons) = Self::summarize(&parsed);
                info!(
                    "Order detail returned {} order(s) over {} suffix level(s), {}/{} carton(s) delivered",
                    parsed.len(),
                    levels,
                    delivered,
                    cartons
                );
                Ok(orders)
            }
            Err(e) if ctx.config().backend.validate_responses => Err(e.into()),
            Err(e) => {
                warn!("Order detail payload does not match the order schema: {}", e);
                Ok(orders)
            }
        }
    }

    /// Suffix levels, delivered cartons and total cartons across all splits.
    fn summarize(orders: &[Order]) -> (usize, usize, usize) {
        orders
            .iter()
            .flat_map(|order| order.walk_splits(MAX_SPLIT_DEPTH))
            .fold((0, 0, 0), |(levels, delivered, total), (_, order)| {
                let cartons = order.cartons();
                let done = cartons.iter().filter(|c| c.is_delivered()).count();
                (levels + 1, delivered + done, total + cartons.len())
            })
    }

    /// Parse raw arguments and execute.
    pub async fn call(arguments: Value, ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        let params: OrderNumberParams = parse_params(Self::NAME, arguments)?;
        Ok(Self::execute(&params, ctx).await)
    }

    /// Create a Tool model for this tool (metadata).
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::backend::Method;
    use crate::domains::tools::testing::{FakeBackend, context, strict_context, texts};
    use serde_json::json;

    fn order_json() -> Value {
        json!({
            "orderNumber": 123456,
            "orderBookedDate": "2024-03-01",
            "orderSuffix": 0,
            "orderStatus": "Open",
            "orderContactFullName": "Jane Doe",
            "contactEmailAddress": "jane@example.com",
            "contactPhone": 5551234,
            "shipTo": 42,
            "shipToName": "Main Street Store"
        })
    }

    fn params(order_number: &str) -> OrderNumberParams {
        OrderNumberParams {
            order_number: order_number.to_string(),
        }
    }

    #[tokio::test]
    async fn test_single_object_wrapped_into_list() {
        let backend = FakeBackend::ok(order_json());
        let result = GetOrderInfoTool::execute(&params("123456"), &context(backend.clone())).await;

        assert!(result.content.is_empty());
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.structured_content, Some(json!([order_json()])));

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].path(), "/order_detail/123456");
    }

    #[tokio::test]
    async fn test_array_payload_passes_through() {
        let payload = json!([order_json(), order_json()]);
        let backend = FakeBackend::ok(payload.clone());
        let result = GetOrderInfoTool::execute(&params("123456"), &context(backend)).await;

        assert_eq!(result.structured_content, Some(payload));
    }

    #[tokio::test]
    async fn test_not_found_is_flagged() {
        let backend = FakeBackend::failing(BackendError::status(404));
        let result = GetOrderInfoTool::execute(&params("99999"), &context(backend)).await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(texts(&result), vec!["Order 99999 not found.".to_string()]);
        assert!(result.structured_content.is_none());
    }

    #[tokio::test]
    async fn test_http_error_is_flagged_with_status() {
        let backend = FakeBackend::failing(BackendError::status(500));
        let result = GetOrderInfoTool::execute(&params("1"), &context(backend)).await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            texts(&result),
            vec!["Error fetching order 1: 500 Internal Server Error".to_string()]
        );
    }

    #[tokio::test]
    async fn test_transport_error_is_flagged() {
        let backend = FakeBackend::failing(BackendError::Transport(
            "error sending request: Connection refused".into(),
        ));
        let result = GetOrderInfoTool::execute(&params("1"), &context(backend)).await;

        assert_eq!(result.is_error, Some(true));
        assert!(texts(&result)[0].contains("Connection refused"));
        assert!(texts(&result)[0].starts_with("Failed to fetch order information: "));
    }

    #[tokio::test]
    async fn test_schema_mismatch_passes_through_by_default() {
        let payload = json!({"orderNumber": "not-a-number"});
        let backend = FakeBackend::ok(payload.clone());
        let result = GetOrderInfoTool::execute(&params("1"), &context(backend)).await;

        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.structured_content, Some(json!([payload])));
    }

    #[tokio::test]
    async fn test_schema_mismatch_rejected_when_strict() {
        let mut payload = order_json();
        payload["contactPhone"] = json!("555-1234");
        let backend = FakeBackend::ok(payload);
        let result = GetOrderInfoTool::execute(&params("1"), &strict_context(backend)).await;

        assert_eq!(result.is_error, Some(true));
        let text = &texts(&result)[0];
        assert!(
            text.starts_with(
                "Failed to fetch order information: response did not match the order schema: \
                 $[0].contactPhone: "
            ),
            "{}",
            text
        );
        assert!(text.contains("\"555-1234\""), "{}", text);
    }

    #[test]
    fn test_summarize_counts_split_levels_and_deliveries() {
        let mut child = order_json();
        child["orderSuffix"] = json!(1);
        child["cartons"] = json!([
            {"orderNumber": 123456, "orderSuffix": 1, "actualDeliveryDate": "2024-03-04", "skus": []},
            {"orderNumber": 123456, "orderSuffix": 1, "actualDeliveryDate": null, "skus": []}
        ]);
        let mut root = order_json();
        root["splitOrders"] = json!([child]);

        let orders = validate_order_list(&json!([root, order_json()])).unwrap();
        assert_eq!(GetOrderInfoTool::summarize(&orders), (3, 1, 2));
    }

    #[tokio::test]
    async fn test_call_rejects_bad_arguments_before_backend() {
        let backend = FakeBackend::ok(order_json());
        let ctx = context(backend.clone());

        let err = GetOrderInfoTool::call(json!({"orderNumber": 123456}), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));
        assert!(backend.requests().is_empty());
    }
}
