//! UUID history tool definition: list, clear, remove.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domains::tools::definitions::common::pretty_json;
use crate::domains::tools::{StatefulTool, ToolContext, ToolError, ToolResult};

/// What to do with the history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    #[default]
    List,
    Clear,
    Remove,
}

/// Parameters for the UUID history tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UuidHistoryParams {
    /// "list" (default), "clear" or "remove".
    #[serde(default)]
    pub action: HistoryAction,

    /// Entry id to remove (the entry's `id`, not its value).
    #[serde(default)]
    pub id: Option<String>,
}

pub struct UuidHistoryTool;

impl StatefulTool for UuidHistoryTool {
    const NAME: &'static str = "uuid_history";
    const DESCRIPTION: &'static str = "Inspect or edit the session UUID history (newest first, at most 50 entries). \
         Actions: list, clear, remove (by entry id).";
    type Params = UuidHistoryParams;

    #[instrument(skip_all, fields(action = ?params.action))]
    async fn execute(params: &UuidHistoryParams, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
        let history = ctx.session().uuid_history();

        let output = match params.action {
            HistoryAction::List => {
                let entries = serde_json::to_value(history.list().await)
                    .map_err(|e| ToolError::internal(e.to_string()))?;
                pretty_json(&entries)?
            }
            HistoryAction::Clear => {
                let removed = history.clear().await;
                info!("Cleared {} history entries", removed);
                format!("Cleared {} entries", removed)
            }
            HistoryAction::Remove => {
                let raw = params
                    .id
                    .as_deref()
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .ok_or_else(|| ToolError::validation("An entry id is required to remove a history entry."))?;
                let id = Uuid::parse_str(raw)
                    .map_err(|_| ToolError::validation(format!("Invalid entry id: {}", raw)))?;
                if !history.remove(id).await {
                    return Err(ToolError::not_found("History entry", id.to_string()));
                }
                format!("Removed entry {}", id)
            }
        };

        let counts = history.counts().await;
        Ok(ToolResult::success(output).with_stats(serde_json::json!({
            "total": counts.total,
            "v4": counts.v4,
            "v1": counts.v1,
        })))
    }
}
