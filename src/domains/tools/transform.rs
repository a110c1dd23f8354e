//! The text-transform tool contract.
//!
//! Every stateless tool is a [`TextTransform`]: typed parameters in, a
//! [`ToolResult`] out. Failures inside a transform are folded into
//! `ToolResult::Error` here, so nothing raised by a parser or decoder reaches
//! the caller as a protocol error.
//!
//! Tools that read or change session state (UUID history, auto-generation,
//! outbound requests, export) implement [`StatefulTool`] instead and receive
//! the [`ToolContext`].
//!
//! The generic functions below give each tool its rmcp `Tool` metadata, its
//! STDIO/TCP `ToolRoute` and its HTTP handler, so a tool file only has to
//! define parameters and `execute()`.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::{debug, warn};

use super::error::ToolError;
use super::session::{ToolContext, ToolSession};

/// Outcome of a single tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ToolResult {
    /// The transform produced an output. `stats` carries informational
    /// values derived alongside it (sizes, counts, ratings).
    Success {
        output: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        stats: Option<serde_json::Value>,
    },

    /// The transform rejected its input.
    Error { message: String },
}

impl ToolResult {
    pub fn success(output: impl Into<String>) -> Self {
        Self::Success {
            output: output.into(),
            stats: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Attach informational stats to a success; errors are left untouched.
    pub fn with_stats(self, value: serde_json::Value) -> Self {
        match self {
            Self::Success { output, .. } => Self::Success {
                output,
                stats: Some(value),
            },
            error => error,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Success { output, .. } => Some(output),
            Self::Error { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            Self::Success { .. } => None,
        }
    }

    pub fn stats(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Success { stats, .. } => stats.as_ref(),
            Self::Error { .. } => None,
        }
    }

    /// Convert into the MCP wire result.
    pub fn into_call_result(self) -> CallToolResult {
        match self {
            Self::Success { output, stats } => {
                let mut result = CallToolResult::success(vec![Content::text(output)]);
                result.structured_content = stats;
                result
            }
            Self::Error { message } => CallToolResult::error(vec![Content::text(message)]),
        }
    }
}

impl From<ToolError> for ToolResult {
    fn from(error: ToolError) -> Self {
        Self::error(error.to_string())
    }
}

/// A stateless, form-to-output tool.
pub trait TextTransform {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// File extension used when the last output is exported.
    const EXPORT_EXTENSION: &'static str = "txt";

    /// Default export file name (without extension).
    const EXPORT_FILE_NAME: &'static str;

    /// Parameters accepted by the tool.
    type Params: DeserializeOwned + JsonSchema + Send + Sync + 'static;

    /// Run the transform. Errors are user-facing messages.
    fn execute(params: &Self::Params) -> Result<ToolResult, ToolError>;

    /// Run the transform, converting any failure into `ToolResult::Error`.
    fn transform(params: &Self::Params) -> ToolResult {
        match Self::execute(params) {
            Ok(result) => result,
            Err(e) => {
                warn!(tool = Self::NAME, kind = e.kind(), "Transform rejected input: {}", e);
                e.into()
            }
        }
    }
}

/// A tool that works against the session.
pub trait StatefulTool {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Parameters accepted by the tool.
    type Params: DeserializeOwned + JsonSchema + Send + Sync + 'static;

    /// Run the tool. Errors are user-facing messages.
    fn execute(
        params: &Self::Params,
        ctx: &ToolContext,
    ) -> impl Future<Output = Result<ToolResult, ToolError>> + Send;
}

/// Run a stateful tool, converting any failure into `ToolResult::Error`.
pub async fn run_stateful<T: StatefulTool>(params: &T::Params, ctx: &ToolContext) -> ToolResult {
    match T::execute(params, ctx).await {
        Ok(result) => result,
        Err(e) => {
            warn!(tool = T::NAME, kind = e.kind(), "Tool call failed: {}", e);
            e.into()
        }
    }
}

fn tool_metadata<P: JsonSchema + 'static>(name: &'static str, description: &'static str) -> Tool {
    Tool {
        name: name.into(),
        description: Some(description.into()),
        input_schema: cached_schema_for_type::<P>(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Build the rmcp `Tool` metadata for a transform.
pub fn to_tool<T: TextTransform>() -> Tool {
    tool_metadata::<T::Params>(T::NAME, T::DESCRIPTION)
}

/// Build the rmcp `Tool` metadata for a stateful tool.
pub fn to_stateful_tool<T: StatefulTool>() -> Tool {
    tool_metadata::<T::Params>(T::NAME, T::DESCRIPTION)
}

/// Transform and remember a non-empty output for later export.
pub async fn invoke<T: TextTransform>(params: &T::Params, session: &ToolSession) -> ToolResult {
    let result = T::transform(params);
    if let Some(output) = result.output().filter(|o| !o.is_empty()) {
        debug!(tool = T::NAME, bytes = output.len(), "Recording output");
        session
            .outputs()
            .record(T::NAME, T::EXPORT_FILE_NAME, T::EXPORT_EXTENSION, output)
            .await;
    }
    result
}

/// Decode tool arguments into a typed parameter struct.
pub fn parse_arguments<P: DeserializeOwned>(args: JsonObject) -> Result<P, McpError> {
    serde_json::from_value(serde_json::Value::Object(args))
        .map_err(|e| McpError::invalid_params(e.to_string(), None))
}

/// Create a ToolRoute for STDIO/TCP transport.
pub fn create_route<T, S>(ctx: Arc<ToolContext>) -> ToolRoute<S>
where
    T: TextTransform + 'static,
    S: Send + Sync + 'static,
{
    ToolRoute::new_dyn(to_tool::<T>(), move |call: ToolCallContext<'_, S>| {
        let args = call.arguments.clone().unwrap_or_default();
        let ctx = ctx.clone();
        async move {
            let params: T::Params = parse_arguments(args)?;
            Ok(invoke::<T>(&params, ctx.session()).await.into_call_result())
        }
        .boxed()
    })
}

/// Create a ToolRoute for a stateful tool.
pub fn create_stateful_route<T, S>(ctx: Arc<ToolContext>) -> ToolRoute<S>
where
    T: StatefulTool + 'static,
    S: Send + Sync + 'static,
{
    ToolRoute::new_dyn(to_stateful_tool::<T>(), move |call: ToolCallContext<'_, S>| {
        let args = call.arguments.clone().unwrap_or_default();
        let ctx = ctx.clone();
        async move {
            let params: T::Params = parse_arguments(args)?;
            Ok(run_stateful::<T>(&params, &ctx).await.into_call_result())
        }
        .boxed()
    })
}

/// HTTP handler for a transform (for HTTP transport).
#[cfg(feature = "http")]
pub async fn http_handler<T: TextTransform>(
    arguments: serde_json::Value,
    ctx: &ToolContext,
) -> Result<serde_json::Value, String> {
    let params: T::Params = serde_json::from_value(arguments)
        .map_err(|e| format!("Invalid arguments for {}: {}", T::NAME, e))?;
    let result = invoke::<T>(&params, ctx.session()).await;
    Ok(call_result_json(&result.into_call_result()))
}

/// HTTP handler for a stateful tool (for HTTP transport).
#[cfg(feature = "http")]
pub async fn stateful_http_handler<T: StatefulTool>(
    arguments: serde_json::Value,
    ctx: &ToolContext,
) -> Result<serde_json::Value, String> {
    let params: T::Params = serde_json::from_value(arguments)
        .map_err(|e| format!("Invalid arguments for {}: {}", T::NAME, e))?;
    let result = run_stateful::<T>(&params, ctx).await;
    Ok(call_result_json(&result.into_call_result()))
}

/// Render a `CallToolResult` the way the HTTP transport reports it.
#[cfg(feature = "http")]
pub fn call_result_json(result: &CallToolResult) -> serde_json::Value {
    serde_json::json!({
        "content": result.content,
        "structuredContent": result.structured_content,
        "isError": result.is_error.unwrap_or(false)
    })
}
