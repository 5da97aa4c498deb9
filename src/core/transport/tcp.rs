//! TCP transport: line-delimited JSON-RPC, one MCP session per connection.
//!
//! Sessions run on their own task over a clone of the server and share
//! nothing mutable, so a slow backend call on one connection never blocks
//! another.

use std::net::SocketAddr;
use std::time::Duration;

use rmcp::ServiceExt;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use super::{TransportError, TransportResult, config::TcpConfig};
use crate::core::McpServer;

/// Back-off after a failed `accept`, so a persistent error does not spin.
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Accept connections forever.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let address = self.address();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|e| TransportError::bind(&address, e))?;

        info!("Ready - listening on {} (JSON-RPC over TCP)", address);

        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                    continue;
                }
            };

            if let Err(e) = stream.set_nodelay(true) {
                debug!("Could not disable Nagle for {}: {}", peer, e);
            }

            tokio::spawn(serve_session(server.clone(), stream, peer));
        }
    }
}

async fn serve_session(server: McpServer, stream: TcpStream, peer: SocketAddr) {
    info!("Accepted connection from {}", peer);

    let session = match server.serve(stream).await {
        Ok(session) => session,
        Err(e) => {
            warn!("MCP handshake with {} failed: {}", peer, e);
            return;
        }
    };

    match session.waiting().await {
        Ok(reason) => info!("Client {} disconnected: {:?}", peer, reason),
        Err(e) => warn!("Session with {} ended abnormally: {:?}", peer, e),
    }
}
