//! Session state resource definition.

use super::ResourceDefinition;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent};

/// History size, auto-generation state, API request phase and exportable outputs.
pub struct SessionStateResource;

impl ResourceDefinition for SessionStateResource {
    const URI: &'static str = "devtools://session/state";
    const NAME: &'static str = "Session State";
    const DESCRIPTION: &'static str = "UUID history size, auto-generation status, API request phase \
         and the tools that have an exportable output";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::SessionState)
    }
}
