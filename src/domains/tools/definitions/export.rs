//! Export tool definition.
//!
//! Writes a tool's last successful output to a file, the server-side
//! counterpart of a "download" button.

use schemars::JsonSchema;
use serde::Deserialize;
use std::fs;
use tracing::{info, instrument, warn};

use crate::core::security::resolve_export_target;
use crate::domains::tools::ToolRegistry;
use crate::domains::tools::{StatefulTool, ToolContext, ToolError, ToolResult};

/// Pseudo-tool name selecting the UUID history.
pub const UUID_HISTORY_SOURCE: &str = "uuid_history";

/// Parameters for the export tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ExportParams {
    /// Tool whose last output is exported, e.g. "json_format". Use
    /// "uuid_history" for the UUID history.
    pub tool: String,

    /// Existing directory to write into.
    pub path: String,

    /// File name without extension (default: the tool's own name, e.g. "beautified").
    #[serde(default)]
    pub filename: Option<String>,

    /// Replace an existing file (default: false).
    #[serde(default)]
    pub overwrite: bool,
}

/// What gets written.
struct ExportSource {
    file_name: String,
    extension: String,
    content: String,
}

pub struct ExportOutputTool;

impl StatefulTool for ExportOutputTool {
    const NAME: &'static str = "export_output";
    const DESCRIPTION: &'static str = "Save the last successful output of a tool to a file. JSON formatter \
         output is written as .json, everything else as .txt. Use tool \"uuid_history\" to save the UUID history.";
    type Params = ExportParams;

    #[instrument(skip_all, fields(tool = %params.tool, path = %params.path))]
    async fn execute(params: &ExportParams, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
        let source = load_source(&params.tool, ctx).await?;
        let file_name = params
            .filename
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&source.file_name);

        let target = resolve_export_target(
            &params.path,
            file_name,
            &source.extension,
            params.overwrite,
            ctx.config(),
        )
        .map_err(|e| {
            warn!("Export target rejected: {}", e);
            ToolError::validation(e.to_string())
        })?;

        fs::write(&target, &source.content)?;
        let bytes = source.content.len();
        info!("Exported {} bytes to {}", bytes, target.display());

        Ok(
            ToolResult::success(format!("Exported {} to {}", params.tool, target.display()))
                .with_stats(serde_json::json!({
                    "tool": params.tool,
                    "path": target.display().to_string(),
                    "bytes": bytes,
                })),
        )
    }
}

async fn load_source(tool: &str, ctx: &ToolContext) -> Result<ExportSource, ToolError> {
    let session = ctx.session();

    if tool == UUID_HISTORY_SOURCE {
        let history = session.uuid_history();
        if history.is_empty().await {
            return Err(ToolError::validation("Nothing to export: the UUID history is empty."));
        }
        return Ok(ExportSource {
            file_name: "uuid-history".to_string(),
            extension: "txt".to_string(),
            content: history.export_lines().await,
        });
    }

    if !ToolRegistry::tool_names().contains(&tool) {
        return Err(ToolError::not_found("Tool", tool));
    }

    let stored = session.outputs().get(tool).await.ok_or_else(|| {
        ToolError::validation(format!("Nothing to export for {}. Run the tool first.", tool))
    })?;
    Ok(ExportSource {
        file_name: stored.file_name,
        extension: stored.extension,
        content: stored.content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::tools::definitions::text::{JsonFormatParams, JsonFormatTool};
    use crate::domains::tools::definitions::uuid::UuidVersion;
    use crate::domains::tools::transform::{invoke, run_stateful};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn params(tool: &str, dir: &TempDir, filename: Option<&str>, overwrite: bool) -> ExportParams {
        ExportParams {
            tool: tool.to_string(),
            path: dir.path().to_string_lossy().to_string(),
            filename: filename.map(String::from),
            overwrite,
        }
    }

    fn context() -> ToolContext {
        ToolContext::new(Arc::new(Config::default()))
    }

    async fn format_json(ctx: &ToolContext) {
        invoke::<JsonFormatTool>(
            &JsonFormatParams {
                input: r#"{"a":1}"#.to_string(),
            },
            ctx.session(),
        )
        .await;
    }

    #[tokio::test]
    async fn test_exports_json_output() {
        let dir = TempDir::new().unwrap();
        let ctx = context();
        format_json(&ctx).await;

        let result = run_stateful::<ExportOutputTool>(&params("json_format", &dir, None, false), &ctx).await;
        assert!(result.is_success(), "{:?}", result);

        let written = fs::read_to_string(dir.path().join("beautified.json")).unwrap();
        assert_eq!(written, "{\n  \"a\": 1\n}");
    }

    #[tokio::test]
    async fn test_refuses_overwrite_without_flag() {
        let dir = TempDir::new().unwrap();
        let ctx = context();
        format_json(&ctx).await;

        let first = run_stateful::<ExportOutputTool>(&params("json_format", &dir, Some("out"), false), &ctx).await;
        assert!(first.is_success());
        let second = run_stateful::<ExportOutputTool>(&params("json_format", &dir, Some("out"), false), &ctx).await;
        assert!(second.message().unwrap().starts_with("File already exists"));
        let third = run_stateful::<ExportOutputTool>(&params("json_format", &dir, Some("out"), true), &ctx).await;
        assert!(third.is_success());
    }

    #[tokio::test]
    async fn test_nothing_recorded_yet() {
        let dir = TempDir::new().unwrap();
        let result = run_stateful::<ExportOutputTool>(&params("hash_generate", &dir, None, false), &context()).await;
        assert_eq!(
            result.message(),
            Some("Nothing to export for hash_generate. Run the tool first.")
        );
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let dir = TempDir::new().unwrap();
        let result = run_stateful::<ExportOutputTool>(&params("nope", &dir, None, false), &context()).await;
        assert_eq!(result.message(), Some("Tool not found: nope"));
    }

    #[tokio::test]
    async fn test_exports_uuid_history() {
        let dir = TempDir::new().unwrap();
        let ctx = context();
        let batch = ctx.session().uuid_generator().batch(UuidVersion::V4, 2);
        ctx.session().uuid_history().record_batch(batch.clone()).await;

        let result = run_stateful::<ExportOutputTool>(&params(UUID_HISTORY_SOURCE, &dir, None, false), &ctx).await;
        assert!(result.is_success());

        let written = fs::read_to_string(dir.path().join("uuid-history.txt")).unwrap();
        let lines: Vec<_> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(&format!("{} (V4) - ", batch[0].value)));
    }

    #[tokio::test]
    async fn test_rejects_path_in_file_name() {
        let dir = TempDir::new().unwrap();
        let ctx = context();
        format_json(&ctx).await;
        let result =
            run_stateful::<ExportOutputTool>(&params("json_format", &dir, Some("../x"), false), &ctx).await;
        assert!(result.message().unwrap().starts_with("Invalid file name"));
    }
}
