//! Resource service implementation.
//!
//! The ResourceService manages resource discovery and access. Resources are
//! defined in `definitions/` and registered via `registry.rs`; adding one
//! does not require modifying this file.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use super::error::ResourceError;
use super::registry::get_all_resources;

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// Produces the resource body on every read.
    pub render: fn() -> Result<String, ResourceError>,
}

/// Service for listing and reading resources.
///
/// Read-only after construction, so it is shared freely between requests.
#[derive(Debug)]
pub struct ResourceService {
    /// Key: resource URI.
    resources: BTreeMap<String, ResourceEntry>,
}

impl Default for ResourceService {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceService {
    pub fn new() -> Self {
        info!("Initializing ResourceService");

        let resources = get_all_resources()
            .into_iter()
            .map(|entry| {
                debug!("Registering resource: {}", entry.resource.raw.uri);
                (entry.resource.raw.uri.clone(), entry)
            })
            .collect();

        Self { resources }
    }

    /// List all available resources, ordered by URI.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .values()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let entry = self.resources.get(uri).ok_or_else(|| {
            warn!("Unknown resource requested: {}", uri);
            ResourceError::not_found(uri)
        })?;

        let text = (entry.render)()?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, uri)],
        })
    }
}
