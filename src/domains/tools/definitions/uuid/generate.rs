//! UUID generator tool definition.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::history::UuidVersion;
use crate::domains::tools::{StatefulTool, ToolContext, ToolError, ToolResult};

pub const MAX_QUANTITY: usize = 50;

/// Parameters for the UUID generator.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UuidGenerateParams {
    /// "v4" (random, default) or "v1" (time based).
    #[serde(default)]
    pub version: UuidVersion,

    /// How many UUIDs to generate, clamped to 1..=50 (default: 1).
    #[serde(default = "default_quantity")]
    pub quantity: usize,
}

fn default_quantity() -> usize {
    1
}

/// UUID generator tool. Every generated value is added to the history.
pub struct UuidGenerateTool;

impl StatefulTool for UuidGenerateTool {
    const NAME: &'static str = "uuid_generate";
    const DESCRIPTION: &'static str = "Generate one or more v4 (random) or v1 (time-based) UUIDs. \
         Generated values are kept in a session history of the 50 most recent.";
    type Params = UuidGenerateParams;

    #[instrument(skip_all, fields(version = %params.version, quantity = params.quantity))]
    async fn execute(params: &UuidGenerateParams, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
        let session = ctx.session();
        let quantity = params.quantity.clamp(1, MAX_QUANTITY);

        let batch = session.uuid_generator().batch(params.version, quantity);
        let output = batch
            .iter()
            .map(|entry| entry.value.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        session.uuid_history().record_batch(batch).await;
        info!("Generated {} {} UUID(s)", quantity, params.version);

        session
            .outputs()
            .record(Self::NAME, "uuids", "txt", &output)
            .await;

        let counts = session.uuid_history().counts().await;
        Ok(ToolResult::success(output).with_stats(serde_json::json!({
            "generated": quantity,
            "version": params.version,
            "history": counts,
        })))
    }
}
