//! Order MCP Server Library
//!
//! A Model Context Protocol (MCP) server that exposes an order-management
//! backend to MCP clients: full order detail with split orders and delivery
//! tracking, order overviews, email-ready renderings and product lookups.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **orders**: order, SKU, carton and product types plus validation
//!   - **backend**: the gateway to the order-management service
//!   - **tools**: MCP tools that forward calls to the backend
//!   - **resources**: JSON Schema resources describing tool output
//!
//! # Example
//!
//! ```rust,no_run
//! use order_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
