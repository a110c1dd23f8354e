//! Tool Router - builds the rmcp ToolRouter for STDIO/TCP transport.
//!
//! Every route shares one [`ToolContext`], so all tools see the same session.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{
    ApiTestTool, Base64Tool, ColorTool, ExportOutputTool, HashTool, JsonFormatTool, JwtDecodeTool,
    PasswordTool, RegexTestTool, SlugTool, TimestampTool, UrlCodecTool, UuidAutoGenerateTool,
    UuidGenerateTool, UuidHistoryTool,
};
use super::session::ToolContext;
use super::transform::{create_route, create_stateful_route};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(ctx: Arc<ToolContext>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(create_route::<JsonFormatTool, S>(ctx.clone()))
        .with_route(create_route::<SlugTool, S>(ctx.clone()))
        .with_route(create_route::<RegexTestTool, S>(ctx.clone()))
        .with_route(create_route::<Base64Tool, S>(ctx.clone()))
        .with_route(create_route::<JwtDecodeTool, S>(ctx.clone()))
        .with_route(create_route::<UrlCodecTool, S>(ctx.clone()))
        .with_route(create_route::<ColorTool, S>(ctx.clone()))
        .with_route(create_route::<TimestampTool, S>(ctx.clone()))
        .with_route(create_route::<PasswordTool, S>(ctx.clone()))
        .with_route(create_route::<HashTool, S>(ctx.clone()))
        .with_route(create_stateful_route::<UuidGenerateTool, S>(ctx.clone()))
        .with_route(create_stateful_route::<UuidHistoryTool, S>(ctx.clone()))
        .with_route(create_stateful_route::<UuidAutoGenerateTool, S>(ctx.clone()))
        .with_route(create_stateful_route::<ApiTestTool, S>(ctx.clone()))
        .with_route(create_stateful_route::<ExportOutputTool, S>(ctx))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use crate::core::config::Config;

    struct TestServer {}

    fn test_context() -> Arc<ToolContext> {
        Arc::new(ToolContext::new(Arc::new(Config::default())))
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_context());
        let tools = router.list_all();
        assert_eq!(tools.len(), 15);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"json_format"));
        assert!(names.contains(&"uuid_auto_generate"));
        assert!(names.contains(&"api_test"));
        assert!(names.contains(&"export_output"));
    }

    #[test]
    fn test_registry_matches_router() {
        // Ensure registry and router have the same tools
        let registry_names = ToolRegistry::tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(test_context());
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }

    #[test]
    fn test_schemas_describe_parameters() {
        let router: ToolRouter<TestServer> = build_tool_router(test_context());
        let tool = router
            .list_all()
            .into_iter()
            .find(|t| t.name == "slug_generate")
            .unwrap();
        let properties = tool.input_schema["properties"].as_object().unwrap();
        for field in ["text", "lower", "strict", "replacement"] {
            assert!(properties.contains_key(field), "missing {}", field);
        }
    }
}
