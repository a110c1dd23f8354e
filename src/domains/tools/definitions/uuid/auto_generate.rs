//! UUID auto-generation tool definition.

use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;

use super::auto::AutoTransition;
use super::history::UuidVersion;
use crate::domains::tools::definitions::common::pretty_json;
use crate::domains::tools::{StatefulTool, ToolContext, ToolError, ToolResult};

/// Parameters for the auto-generation switch.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UuidAutoGenerateParams {
    /// true to start periodic generation, false to stop it.
    pub enabled: bool,

    /// Version generated on each tick (default: "v4").
    #[serde(default)]
    pub version: UuidVersion,
}

pub struct UuidAutoGenerateTool;

impl StatefulTool for UuidAutoGenerateTool {
    const NAME: &'static str = "uuid_auto_generate";
    const DESCRIPTION: &'static str = "Start or stop periodic UUID generation into the session history. \
         Starting while running and stopping while stopped have no effect.";
    type Params = UuidAutoGenerateParams;

    #[instrument(skip_all, fields(enabled = params.enabled, version = %params.version))]
    async fn execute(params: &UuidAutoGenerateParams, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
        let session = ctx.session();
        let auto = session.auto_generator();

        let transition = if params.enabled {
            auto.start(
                params.version,
                *session.uuid_generator(),
                Arc::clone(session.uuid_history()),
            )
        } else {
            auto.stop()
        };

        let status = auto.status();
        let summary = match transition {
            AutoTransition::Started => "Auto-generation started",
            AutoTransition::Switched => "Auto-generation switched version",
            AutoTransition::Stopped => "Auto-generation stopped",
            AutoTransition::Unchanged if status.running => "Auto-generation already running",
            AutoTransition::Unchanged => "Auto-generation already stopped",
        };

        let status_json =
            serde_json::to_value(status).map_err(|e| ToolError::internal(e.to_string()))?;
        let output = format!("{}\n{}", summary, pretty_json(&status_json)?);
        Ok(ToolResult::success(output).with_stats(status_json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::tools::transform::run_stateful;

    async fn toggle(ctx: &ToolContext, enabled: bool, version: UuidVersion) -> ToolResult {
        run_stateful::<UuidAutoGenerateTool>(&UuidAutoGenerateParams { enabled, version }, ctx).await
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_cycle() {
        let ctx = ToolContext::new(Arc::new(Config::default()));

        let started = toggle(&ctx, true, UuidVersion::V4).await;
        assert!(started.output().unwrap().starts_with("Auto-generation started\n"));
        assert_eq!(started.stats().unwrap()["running"], true);

        let again = toggle(&ctx, true, UuidVersion::V4).await;
        assert!(again.output().unwrap().starts_with("Auto-generation already running"));

        tokio::time::sleep(std::time::Duration::from_millis(4500)).await;
        assert_eq!(ctx.session().uuid_history().len().await, 2);

        let stopped = toggle(&ctx, false, UuidVersion::V4).await;
        assert!(stopped.output().unwrap().starts_with("Auto-generation stopped"));
        assert_eq!(stopped.stats().unwrap()["running"], false);
        let noop = toggle(&ctx, false, UuidVersion::V4).await;
        assert!(noop.output().unwrap().starts_with("Auto-generation already stopped"));
    }
}
