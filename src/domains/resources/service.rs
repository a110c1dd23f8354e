//! Resource service implementation.
//!
//! The ResourceService manages resource discovery and access.
//! It maintains a registry of available resources and handles read requests.
//! Dynamic resources are rendered from the tool session at read time.
//!
//! Resources are defined in `definitions/` and registered via `registry.rs`.
//! Adding a new resource does NOT require modifying this file.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

use super::error::ResourceError;
use super::registry::get_all_resources;
use crate::domains::tools::{ToolRegistry, ToolSession};

/// Service for managing and accessing resources.
pub struct ResourceService {
    /// Server name reported by the server info resource.
    server_name: String,

    /// Session the dynamic resources read from.
    session: Arc<ToolSession>,

    /// Registry of available resources, keyed by URI.
    resources: BTreeMap<String, ResourceEntry>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// The content provider for this resource.
    pub content: ResourceContent,
}

/// Different types of resource content.
#[derive(Debug, Clone)]
pub enum ResourceContent {
    /// Static text content.
    Text(String),

    /// Content rendered on each read.
    Dynamic(DynamicResourceType),
}

/// Types of dynamic resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicResourceType {
    ServerInfo,
    UuidHistory,
    SessionState,
}

impl ResourceService {
    /// Create a new ResourceService over the given session.
    pub fn new(server_name: impl Into<String>, session: Arc<ToolSession>) -> Self {
        info!("Initializing ResourceService");

        let mut service = Self {
            server_name: server_name.into(),
            session,
            resources: BTreeMap::new(),
        };
        for entry in get_all_resources() {
            service.register_resource(entry);
        }
        service
    }

    /// Register a resource.
    pub fn register_resource(&mut self, entry: ResourceEntry) {
        debug!("Registering resource: {}", entry.resource.raw.uri);
        self.resources
            .insert(entry.resource.raw.uri.to_string(), entry);
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .values()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let entry = self
            .resources
            .get(uri)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        let text = match &entry.content {
            ResourceContent::Text(text) => text.clone(),
            ResourceContent::Dynamic(dynamic_type) => {
                let value = self.resolve_dynamic_content(*dynamic_type).await?;
                serde_json::to_string_pretty(&value)
                    .map_err(|e| ResourceError::internal(e.to_string()))?
            }
        };

        let mut content = ResourceContents::text(text, uri);
        if let ResourceContents::TextResourceContents { mime_type, .. } = &mut content {
            mime_type.clone_from(&entry.resource.raw.mime_type);
        }

        Ok(ReadResourceResult {
            contents: vec![content],
        })
    }

    /// Resolve dynamic resource content.
    async fn resolve_dynamic_content(
        &self,
        dynamic_type: DynamicResourceType,
    ) -> Result<serde_json::Value, ResourceError> {
        match dynamic_type {
            DynamicResourceType::ServerInfo => Ok(serde_json::json!({
                "server": self.server_name,
                "version": env!("CARGO_PKG_VERSION"),
                "tools": ToolRegistry::tool_names(),
            })),
            DynamicResourceType::UuidHistory => serde_json::to_value(
                self.session.uuid_history().list().await,
            )
            .map_err(|e| ResourceError::internal(e.to_string())),
            DynamicResourceType::SessionState => Ok(self.session.snapshot().await),
        }
    }
}
