//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to domain-specific services.
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool
//! and routed through `domains/tools/router.rs` (STDIO/TCP) or the
//! [`ToolRegistry`] (HTTP). Resources come from `domains/resources/`.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::{
    backend::BackendGateway,
    resources::{ResourceError, ResourceService},
    tools::{ToolContext, ToolRegistry, build_tool_router},
};

/// Instructions advertised to clients during initialization.
pub const INSTRUCTIONS: &str = "Order lookup server. Use get-order-info for full order detail \
     (split orders, SKUs, cartons and delivery tracking), get-order-overview for a summary, \
     get-order-email for an email-ready rendering, and get-products to describe SKUs.";

/// The main MCP server handler.
///
/// Cloning is cheap; every clone shares the same read-only state, so each
/// connection or request gets its own handle without synchronization.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Name-based tool dispatch (HTTP transport).
    tool_registry: ToolRegistry,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Tool router for handling tool calls (STDIO/TCP transport).
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server talking HTTP to the configured backend.
    pub fn new(config: Config) -> crate::Result<Self> {
        let config = Arc::new(config);
        let tool_ctx = ToolContext::from_config(config.clone())?;
        info!("Backend gateway at {}", config.backend.base_url);
        Ok(Self::with_context(config, tool_ctx))
    }

    /// Create a server around an explicit backend capability.
    pub fn with_backend(config: Config, backend: Arc<dyn BackendGateway>) -> Self {
        let config = Arc::new(config);
        let tool_ctx = ToolContext::new(config.clone(), backend);
        Self::with_context(config, tool_ctx)
    }

    fn with_context(config: Arc<Config>, tool_ctx: ToolContext) -> Self {
        let tool_ctx = Arc::new(tool_ctx);
        Self {
            config,
            tool_registry: ToolRegistry::new(tool_ctx.clone()),
            resource_service: Arc::new(ResourceService::new()),
            tool_router: build_tool_router::<Self>(tool_ctx),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Backend failures come back as `Ok` with the tool's failure envelope;
    /// only unknown tools and invalid arguments are errors.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> crate::Result<Value> {
        let result = self.tool_registry.call_tool(name, arguments).await?;
        Ok(serde_json::to_value(result)?)
    }

    /// List all available resources (for HTTP transport).
    pub async fn list_resources(&self) -> Vec<Value> {
        self.resource_service
            .list_resources()
            .await
            .into_iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.raw.uri,
                    "name": r.raw.name,
                    "description": r.raw.description,
                    "mimeType": r.raw.mime_type
                })
            })
            .collect()
    }

    /// Read a resource by URI (for HTTP transport).
    pub async fn read_resource(&self, uri: &str) -> crate::Result<Value> {
        let result = self.resource_service.read_resource(uri).await?;
        Ok(serde_json::json!({ "contents": result.contents }))
    }
}

fn resource_error(e: ResourceError) -> McpError {
    if e.is_not_found() {
        McpError::resource_not_found(e.to_string(), None)
    } else {
        McpError::internal_error(e.to_string(), None)
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(resource_error)
    }
}
