//! Resource service implementation.
//!
//! The ResourceService manages resource discovery and access.
//! Resources are defined in `definitions/` and registered via `registry.rs`.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use tracing::{debug, info};

use super::error::ResourceError;
use super::registry::get_all_resources;
use crate::core::config::ActitimeConfig;

/// Service for listing and reading resources.
///
/// Content is rendered once at startup; the settings it is derived from
/// never change while the server runs.
pub struct ResourceService {
    /// Registered resources, in listing order.
    resources: Vec<ResourceEntry>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// The rendered text content.
    pub content: String,
}

impl ResourceService {
    /// Create a new ResourceService for the given connection settings.
    pub fn new(config: &ActitimeConfig) -> Self {
        let resources = get_all_resources(config);
        info!("Registered {} resources", resources.len());
        Self { resources }
    }

    /// List all available resources.
    pub fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .iter()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// Read a resource by exact URI.
    pub fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        debug!("Reading resource: {}", uri);
        let entry = self
            .resources
            .iter()
            .find(|entry| entry.resource.raw.uri == uri)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: uri.to_string(),
                mime_type: entry.resource.raw.mime_type.clone(),
                text: entry.content.clone(),
                meta: None,
            }],
        })
    }
}
