//! STDIO transport implementation.
//!
//! Standard input/output transport for MCP - the default mode. Stdout is the
//! wire, so all logging goes to stderr.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Serve a single client over stdin/stdout until it disconnects.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(TransportError::handshake)?;

        let reason = service
            .waiting()
            .await
            .map_err(TransportError::serve)?;

        info!("STDIO transport finished: {:?}", reason);
        Ok(())
    }
}
