//! Helpers shared across tool definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domains::tools::ToolError;

/// Direction of a two-way codec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CodecMode {
    #[default]
    Encode,
    Decode,
}

impl CodecMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Encode => "Encoding",
            Self::Decode => "Decoding",
        }
    }
}

/// Reject blank input with the given message.
pub fn require_input<'a>(input: &'a str, message: &str) -> Result<&'a str, ToolError> {
    if input.trim().is_empty() {
        Err(ToolError::validation(message))
    } else {
        Ok(input)
    }
}

/// Pretty-print a JSON value with two-space indentation.
pub fn pretty_json(value: &serde_json::Value) -> Result<String, ToolError> {
    serde_json::to_string_pretty(value).map_err(|e| ToolError::internal(e.to_string()))
}
