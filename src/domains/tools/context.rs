//! Shared, read-only state handed to every tool call.

use std::sync::Arc;

use crate::core::config::Config;
use crate::domains::backend::{BackendError, BackendGateway, HttpBackend};

/// Everything a tool handler may use: configuration and the backend
/// capability. Holds no per-call state.
#[derive(Clone)]
pub struct ToolContext {
    config: Arc<Config>,
    backend: Arc<dyn BackendGateway>,
}

impl ToolContext {
    /// Create a context around an explicit backend (used by tests).
    pub fn new(config: Arc<Config>, backend: Arc<dyn BackendGateway>) -> Self {
        Self { config, backend }
    }

    /// Create a context talking HTTP to the configured backend.
    pub fn from_config(config: Arc<Config>) -> Result<Self, BackendError> {
        let backend = HttpBackend::new(&config.backend)?;
        Ok(Self::new(config, Arc::new(backend)))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn backend(&self) -> &dyn BackendGateway {
        self.backend.as_ref()
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext")
            .field("backend_url", &self.config.backend.base_url)
            .finish_non_exhaustive()
    }
}
