//! Test doubles for tool handlers.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::context::ToolContext;
use crate::core::config::Config;
use crate::domains::backend::{BackendError, BackendGateway, BackendRequest};

/// Backend that answers every call with the same canned outcome and records
/// what it was asked.
pub struct FakeBackend {
    response: Result<Value, BackendError>,
    requests: Mutex<Vec<BackendRequest>>,
}

impl FakeBackend {
    pub fn ok(payload: Value) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(payload),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(err: BackendError) -> Arc<Self> {
        Arc::new(Self {
            response: Err(err),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<BackendRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl BackendGateway for FakeBackend {
    async fn fetch(&self, request: BackendRequest) -> Result<Value, BackendError> {
        self.requests.lock().unwrap().push(request);
        self.response.clone()
    }
}

/// Context with default config around `backend`.
pub fn context(backend: Arc<FakeBackend>) -> ToolContext {
    ToolContext::new(Arc::new(Config::default()), backend)
}

/// Context with strict response validation enabled.
pub fn strict_context(backend: Arc<FakeBackend>) -> ToolContext {
    let mut config = Config::default();
    config.backend.validate_responses = true;
    ToolContext::new(Arc::new(config), backend)
}

/// Text of every text content block.
pub fn texts(result: &rmcp::model::CallToolResult) -> Vec<String> {
    result
        .content
        .iter()
        .filter_map(|c| match &c.raw {
            rmcp::model::RawContent::Text(t) => Some(t.text.clone()),
            _ => None,
        })
        .collect()
}
