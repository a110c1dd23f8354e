//! UUID history resource definition.

use super::ResourceDefinition;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent};

/// The session UUID history, newest first.
pub struct UuidHistoryResource;

impl ResourceDefinition for UuidHistoryResource {
    const URI: &'static str = "devtools://uuid/history";
    const NAME: &'static str = "UUID History";
    const DESCRIPTION: &'static str = "UUIDs generated in this session, newest first (at most 50)";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::UuidHistory)
    }
}
