//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The list of available tool names and their metadata
//! - HTTP dispatch for tool calls (when http feature is enabled)

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use super::definitions::{
    ApiTestTool, Base64Tool, ColorTool, ExportOutputTool, HashTool, JsonFormatTool, JwtDecodeTool,
    PasswordTool, RegexTestTool, SlugTool, TimestampTool, UrlCodecTool, UuidAutoGenerateTool,
    UuidGenerateTool, UuidHistoryTool,
};
use super::session::ToolContext;
use super::transform::{StatefulTool, TextTransform, to_stateful_tool, to_tool};
#[cfg(feature = "http")]
use super::transform::{http_handler, stateful_http_handler};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// Holds the shared [`ToolContext`] so HTTP calls see the same session as
/// the rmcp router.
pub struct ToolRegistry {
    ctx: Arc<ToolContext>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &Arc<ToolContext> {
        &self.ctx
    }

    /// Get all tool names.
    pub fn tool_names() -> Vec<&'static str> {
        vec![
            JsonFormatTool::NAME,
            SlugTool::NAME,
            RegexTestTool::NAME,
            Base64Tool::NAME,
            JwtDecodeTool::NAME,
            UrlCodecTool::NAME,
            ColorTool::NAME,
            TimestampTool::NAME,
            PasswordTool::NAME,
            HashTool::NAME,
            UuidGenerateTool::NAME,
            UuidHistoryTool::NAME,
            UuidAutoGenerateTool::NAME,
            ApiTestTool::NAME,
            ExportOutputTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    /// Both HTTP and STDIO/TCP transports use this to get tool metadata.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            to_tool::<JsonFormatTool>(),
            to_tool::<SlugTool>(),
            to_tool::<RegexTestTool>(),
            to_tool::<Base64Tool>(),
            to_tool::<JwtDecodeTool>(),
            to_tool::<UrlCodecTool>(),
            to_tool::<ColorTool>(),
            to_tool::<TimestampTool>(),
            to_tool::<PasswordTool>(),
            to_tool::<HashTool>(),
            to_stateful_tool::<UuidGenerateTool>(),
            to_stateful_tool::<UuidHistoryTool>(),
            to_stateful_tool::<UuidAutoGenerateTool>(),
            to_stateful_tool::<ApiTestTool>(),
            to_stateful_tool::<ExportOutputTool>(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// This is used by the HTTP transport to call tools.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let ctx = self.ctx.as_ref();
        match name {
            JsonFormatTool::NAME => http_handler::<JsonFormatTool>(arguments, ctx).await,
            SlugTool::NAME => http_handler::<SlugTool>(arguments, ctx).await,
            RegexTestTool::NAME => http_handler::<RegexTestTool>(arguments, ctx).await,
            Base64Tool::NAME => http_handler::<Base64Tool>(arguments, ctx).await,
            JwtDecodeTool::NAME => http_handler::<JwtDecodeTool>(arguments, ctx).await,
            UrlCodecTool::NAME => http_handler::<UrlCodecTool>(arguments, ctx).await,
            ColorTool::NAME => http_handler::<ColorTool>(arguments, ctx).await,
            TimestampTool::NAME => http_handler::<TimestampTool>(arguments, ctx).await,
            PasswordTool::NAME => http_handler::<PasswordTool>(arguments, ctx).await,
            HashTool::NAME => http_handler::<HashTool>(arguments, ctx).await,
            UuidGenerateTool::NAME => stateful_http_handler::<UuidGenerateTool>(arguments, ctx).await,
            UuidHistoryTool::NAME => stateful_http_handler::<UuidHistoryTool>(arguments, ctx).await,
            UuidAutoGenerateTool::NAME => {
                stateful_http_handler::<UuidAutoGenerateTool>(arguments, ctx).await
            }
            ApiTestTool::NAME => stateful_http_handler::<ApiTestTool>(arguments, ctx).await,
            ExportOutputTool::NAME => stateful_http_handler::<ExportOutputTool>(arguments, ctx).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(format!("Unknown tool: {}", name))
            }
        }
    }
}
