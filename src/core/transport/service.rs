//! Runs the server on whichever transport the configuration selects.

use tracing::{Instrument, info, info_span};

use super::{TransportConfig, TransportResult};
use crate::core::McpServer;

/// Owns the transport choice until the server is started.
pub struct TransportService {
    config: TransportConfig,
}

impl TransportService {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Serve `server` until the transport shuts down.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let span = info_span!("transport", kind = %self.config);
        async move {
            info!("Starting transport: {}", self.config);
            match self.config {
                #[cfg(feature = "stdio")]
                TransportConfig::Stdio => super::stdio::StdioTransport::run(server).await,
                #[cfg(feature = "tcp")]
                TransportConfig::Tcp(cfg) => super::tcp::TcpTransport::new(cfg).run(server).await,
                #[cfg(feature = "http")]
                TransportConfig::Http(cfg) => {
                    super::http::HttpTransport::new(cfg).run(server).await
                }
            }
        }
        .instrument(span)
        .await
    }
}
