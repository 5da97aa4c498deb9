//! HTTP transport implementation.
//!
//! HTTP server with JSON-RPC over POST requests. The transport is
//! stateless: there is no session store, and every request is handled on
//! its own clone of the server.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::server::INSTRUCTIONS;
use crate::core::{Error, McpServer};

/// MCP protocol revision spoken over HTTP.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC error codes used by this transport.
pub mod codes {
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    /// Server-defined: wrong HTTP verb on the RPC path.
    pub const METHOD_NOT_ALLOWED: i32 = -32000;
    /// MCP: no resource under the requested URI.
    pub const RESOURCE_NOT_FOUND: i32 = -32002;
}

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// A response carries exactly one of `result` or `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(codes::INVALID_PARAMS, message)
    }
}

impl From<Error> for JsonRpcError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::Tool(_) => codes::INVALID_PARAMS,
            Error::Resource(e) if e.is_not_found() => codes::RESOURCE_NOT_FOUND,
            _ => codes::INTERNAL_ERROR,
        };
        Self::new(code, err.to_string())
    }
}

impl JsonRpcResponse {
    /// Wrap a dispatch outcome for request `id`.
    pub fn reply(id: Option<Value>, outcome: Result<Value, JsonRpcError>) -> Self {
        let (result, error) = match outcome {
            Ok(value) => (Some(value), None),
            Err(e) => (None, Some(e)),
        };
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result,
            error,
        }
    }
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The MCP server instance.
    server: McpServer,
    /// Where JSON-RPC is served, echoed by the root handler.
    rpc_path: String,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the axum router for `server`.
    pub fn router(&self, server: McpServer) -> Router {
        let state = AppState {
            server,
            rpc_path: self.config.rpc_path.clone(),
        };

        let mut app = Router::new()
            .route(
                &self.config.rpc_path,
                post(handle_rpc).fallback(method_not_allowed),
            )
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        app
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!(
            "Ready - listening on {} (JSON-RPC over HTTP, CORS {})",
            addr, cors_status
        );
        info!("  → JSON-RPC: POST {}", self.config.rpc_path);
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .await
            .map_err(TransportError::serve)?;

        Ok(())
    }
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "rpc": state.rpc_path,
            "health": "/health"
        },
        "protocol": "JSON-RPC 2.0",
        "documentation": format!("Send POST requests to {} with JSON-RPC messages", state.rpc_path)
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Any verb other than POST on the JSON-RPC path.
async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({
            "jsonrpc": "2.0",
            "error": {
                "code": codes::METHOD_NOT_ALLOWED,
                "message": "Method not allowed."
            },
            "id": null
        })),
    )
}

/// Handle JSON-RPC requests.
///
/// Notifications carry no `id` and get `202 Accepted` with an empty body;
/// JSON-RPC never answers them.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(State(state): State<AppState>, Json(request): Json<JsonRpcRequest>) -> Response {
    tracing::Span::current().record("method", &request.method);
    info!("Received JSON-RPC request: {}", request.method);

    let is_notification = request.id.is_none() && request.method.starts_with("notifications/");
    let response = process_request(&state, request).await;

    if is_notification {
        StatusCode::ACCEPTED.into_response()
    } else {
        (StatusCode::OK, Json(response)).into_response()
    }
}

/// Route one request to its handler.
async fn process_request(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let outcome = if request.jsonrpc != "2.0" {
        Err(JsonRpcError::new(codes::INVALID_REQUEST, "Invalid Request"))
    } else {
        dispatch(state, &request.method, request.params.unwrap_or(Value::Null)).await
    };

    if let Err(e) = &outcome {
        warn!("{} failed: {} ({})", request.method, e.message, e.code);
    }
    JsonRpcResponse::reply(request.id, outcome)
}

async fn dispatch(state: &AppState, method: &str, params: Value) -> Result<Value, JsonRpcError> {
    let server = &state.server;

    match method {
        "initialize" => Ok(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {}, "resources": {} },
            "serverInfo": { "name": server.name(), "version": server.version() },
            "instructions": INSTRUCTIONS
        })),

        "tools/list" => Ok(json!({ "tools": server.list_tools() })),

        "tools/call" => {
            let name = required_str(&params, "name", "Missing tool name")?;
            let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));
            Ok(server.call_tool(name, arguments).await?)
        }

        "resources/list" => Ok(json!({ "resources": server.list_resources().await })),

        "resources/read" => {
            let uri = required_str(&params, "uri", "Missing resource URI")?;
            Ok(server.read_resource(uri).await?)
        }

        // Nothing to track on a stateless transport.
        m if m.starts_with("notifications/") => {
            debug!("Acknowledging {}", m);
            Ok(Value::Null)
        }

        _ => Err(JsonRpcError::new(codes::METHOD_NOT_FOUND, "Method not found")),
    }
}

/// A string member of the request params.
fn required_str<'a>(params: &'a Value, key: &str, missing: &str) -> Result<&'a str, JsonRpcError> {
    params
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| JsonRpcError::invalid_params(missing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::backend::BackendError;
    use crate::domains::tools::testing::FakeBackend;
    use axum::body::Body;
    use bytes::Bytes;
    use http::{Method, Request};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(backend: Arc<FakeBackend>) -> Router {
        let server = McpServer::with_backend(Config::default(), backend);
        HttpTransport::new(HttpConfig::default()).router(server)
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes: Bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn rpc(app: Router, method: &str, params: Value) -> Value {
        let request = json!({"jsonrpc": "2.0", "id": 1, "method": method, "params": params});
        let (status, body) = send(app, Method::POST, "/mcp", Some(request)).await;
        assert_eq!(status, StatusCode::OK);
        body
    }

    #[tokio::test]
    async fn test_initialize() {
        let body = rpc(app(FakeBackend::ok(json!({}))), "initialize", json!({})).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["result"]["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(body["result"]["serverInfo"]["name"], "order-mcp-server");
        assert!(body["result"]["capabilities"].get("prompts").is_none());
    }

    #[tokio::test]
    async fn test_tools_list() {
        let body = rpc(app(FakeBackend::ok(json!({}))), "tools/list", json!({})).await;
        let tools = body["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 4);
    }

    #[tokio::test]
    async fn test_tools_call_success() {
        let backend = FakeBackend::ok(json!({"to": "a@b.c"}));
        let body = rpc(
            app(backend.clone()),
            "tools/call",
            json!({"name": "get-order-email", "arguments": {"orderNumber": "9"}}),
        )
        .await;

        assert_eq!(body["result"]["content"][0]["text"], r#"{"to":"a@b.c"}"#);
        assert_eq!(backend.requests()[0].path(), "/email/9");
    }

    #[tokio::test]
    async fn test_tools_call_backend_failure_is_a_result() {
        let body = rpc(
            app(FakeBackend::failing(BackendError::status(500))),
            "tools/call",
            json!({"name": "get-order-info", "arguments": {"orderNumber": "9"}}),
        )
        .await;

        assert!(body.get("error").is_none());
        assert_eq!(body["result"]["isError"], true);
        assert_eq!(
            body["result"]["content"][0]["text"],
            "Error fetching order 9: 500 Internal Server Error"
        );
    }

    #[tokio::test]
    async fn test_tools_call_invalid_arguments() {
        let body = rpc(
            app(FakeBackend::ok(json!({}))),
            "tools/call",
            json!({"name": "get-products", "arguments": {"skus": "A1"}}),
        )
        .await;
        assert_eq!(body["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn test_tools_call_unknown_tool() {
        let body = rpc(
            app(FakeBackend::ok(json!({}))),
            "tools/call",
            json!({"name": "get-invoice", "arguments": {}}),
        )
        .await;
        assert_eq!(body["error"]["code"], -32602);
        assert!(
            body["error"]["message"]
                .as_str()
                .unwrap()
                .contains("Unknown tool: get-invoice")
        );
    }

    #[tokio::test]
    async fn test_tools_call_missing_name() {
        let body = rpc(app(FakeBackend::ok(json!({}))), "tools/call", json!({})).await;
        assert_eq!(body["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn test_resources() {
        let body = rpc(app(FakeBackend::ok(json!({}))), "resources/list", json!({})).await;
        assert_eq!(body["result"]["resources"].as_array().unwrap().len(), 2);

        let body = rpc(
            app(FakeBackend::ok(json!({}))),
            "resources/read",
            json!({"uri": "schema://orders/order-list"}),
        )
        .await;
        assert_eq!(
            body["result"]["contents"][0]["uri"],
            "schema://orders/order-list"
        );

        let body = rpc(
            app(FakeBackend::ok(json!({}))),
            "resources/read",
            json!({"uri": "schema://orders/unknown"}),
        )
        .await;
        assert_eq!(body["error"]["code"], -32002);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let body = rpc(app(FakeBackend::ok(json!({}))), "prompts/list", json!({})).await;
        assert_eq!(body["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn test_wrong_jsonrpc_version() {
        let request = json!({"jsonrpc": "1.0", "id": 3, "method": "tools/list"});
        let (_, body) = send(app(FakeBackend::ok(json!({}))), Method::POST, "/mcp", Some(request)).await;
        assert_eq!(body["error"]["code"], -32600);
        assert_eq!(body["id"], 3);
    }

    #[tokio::test]
    async fn test_notification_gets_empty_accepted_reply() {
        let notification = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
        let (status, body) = send(
            app(FakeBackend::ok(json!({}))),
            Method::POST,
            "/mcp",
            Some(notification),
        )
        .await;

        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn test_notification_method_with_id_still_answered() {
        let body = rpc(
            app(FakeBackend::ok(json!({}))),
            "notifications/initialized",
            json!({}),
        )
        .await;
        assert_eq!(body["id"], 1);
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_non_post_on_rpc_path() {
        for method in [Method::GET, Method::DELETE, Method::PUT] {
            let (status, body) = send(app(FakeBackend::ok(json!({}))), method, "/mcp", None).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(
                body,
                json!({
                    "jsonrpc": "2.0",
                    "error": {"code": -32000, "message": "Method not allowed."},
                    "id": null
                })
            );
        }
    }

    #[tokio::test]
    async fn test_health_and_root() {
        let (status, body) = send(app(FakeBackend::ok(json!({}))), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, body) = send(app(FakeBackend::ok(json!({}))), Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["endpoints"]["rpc"], "/mcp");
    }
}
