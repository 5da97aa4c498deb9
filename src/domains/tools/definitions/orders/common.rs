//! Common pieces shared by the order tools.

use rmcp::{handler::server::tool::schema_for_type, model::Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domains::tools::ToolError;

/// Parameters for tools keyed by an order number.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrderNumberParams {
    /// The order number to look up.
    #[schemars(description = "The order number to look up")]
    pub order_number: String,
}

/// Deserialize tool arguments, rejecting missing, extra or mistyped fields.
pub fn parse_params<P: DeserializeOwned>(tool: &str, arguments: Value) -> Result<P, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid_arguments(tool, e.to_string()))
}

/// Tool metadata with the input schema generated from `P`.
pub fn tool_model<P: JsonSchema + 'static>(name: &'static str, description: &'static str) -> Tool {
    Tool {
        name: name.into(),
        description: Some(description.into()),
        input_schema: schema_for_type::<P>().into(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_number_params() {
        let params: OrderNumberParams =
            parse_params("get-order-info", json!({"orderNumber": "12345"})).unwrap();
        assert_eq!(params.order_number, "12345");
    }

    #[test]
    fn test_rejects_mistyped_order_number() {
        let err = parse_params::<OrderNumberParams>("get-order-info", json!({"orderNumber": 12345}))
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { ref tool, .. } if tool == "get-order-info"));
    }

    #[test]
    fn test_rejects_extra_and_missing_fields() {
        assert!(
            parse_params::<OrderNumberParams>(
                "get-order-info",
                json!({"orderNumber": "1", "verbose": true})
            )
            .is_err()
        );
        assert!(parse_params::<OrderNumberParams>("get-order-info", json!({})).is_err());
        assert!(parse_params::<OrderNumberParams>("get-order-info", json!("1")).is_err());
    }

    #[test]
    fn test_tool_model_schema() {
        let tool = tool_model::<OrderNumberParams>("get-order-info", "desc");
        assert_eq!(tool.name, "get-order-info");

        let schema = Value::Object((*tool.input_schema).clone());
        assert_eq!(schema["properties"]["orderNumber"]["type"], "string");
        assert_eq!(schema["required"], json!(["orderNumber"]));
        assert_eq!(schema["additionalProperties"], json!(false));
    }
}
