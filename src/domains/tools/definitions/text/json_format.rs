//! JSON formatter tool definition.
//!
//! Parses JSON input and re-serializes it with two-space indentation.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::tools::definitions::common::{pretty_json, require_input};
use crate::domains::tools::{TextTransform, ToolError, ToolResult};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the JSON formatter.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct JsonFormatParams {
    /// Raw JSON text to beautify.
    #[schemars(description = "JSON text to format")]
    pub input: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// JSON formatter - parse then pretty-print.
pub struct JsonFormatTool;

impl TextTransform for JsonFormatTool {
    const NAME: &'static str = "json_format";
    const DESCRIPTION: &'static str = "Validate and beautify JSON with 2-space indentation. \
         Reports byte size, line count and object count as stats.";
    const EXPORT_EXTENSION: &'static str = "json";
    const EXPORT_FILE_NAME: &'static str = "beautified";
    type Params = JsonFormatParams;

    #[instrument(skip_all, fields(len = params.input.len()))]
    fn execute(params: &JsonFormatParams) -> Result<ToolResult, ToolError> {
        let input = require_input(&params.input, "Please enter some JSON to beautify")?;

        let parsed: serde_json::Value = serde_json::from_str(input).map_err(|_| {
            ToolError::validation("Invalid JSON format. Please check your syntax and try again.")
        })?;

        let pretty = pretty_json(&parsed)?;
        let stats = JsonStats::of(input, &parsed)?;
        info!("Formatted JSON: {} bytes, {} objects", stats.size, stats.objects);

        Ok(ToolResult::success(pretty).with_stats(serde_json::json!({
            "size": stats.size,
            "size_display": format_bytes(stats.size),
            "lines": stats.lines,
            "objects": stats.objects,
        })))
    }
}

/// Informational stats about a JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonStats {
    /// Bytes of the compact serialization.
    pub size: usize,
    /// Lines in the original input.
    pub lines: usize,
    /// Opening braces in the compact serialization.
    pub objects: usize,
}

impl JsonStats {
    fn of(input: &str, parsed: &serde_json::Value) -> Result<Self, ToolError> {
        let compact =
            serde_json::to_string(parsed).map_err(|e| ToolError::internal(e.to_string()))?;
        Ok(Self {
            size: compact.len(),
            lines: input.split('\n').count(),
            objects: compact.matches('{').count(),
        })
    }
}

/// Human-readable byte count ("0 Bytes", "1.5 KB").
fn format_bytes(bytes: usize) -> String {
    const UNITS: &[&str] = &["Bytes", "KB", "MB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;
    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    let rounded = (size * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit_index])
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run(input: &str) -> ToolResult {
        JsonFormatTool::transform(&JsonFormatParams {
            input: input.to_string(),
        })
    }

    #[test]
    fn test_beautify_preserves_key_order() {
        let result = run(r#"{"name":"John Doe","age":30,"tags":["a"]}"#);
        assert_eq!(
            result.output().unwrap(),
            "{\n  \"name\": \"John Doe\",\n  \"age\": 30,\n  \"tags\": [\n    \"a\"\n  ]\n}"
        );
    }

    #[test]
    fn test_invalid_json_is_error() {
        let result = run("{\"a\": }");
        assert_eq!(
            result.message(),
            Some("Invalid JSON format. Please check your syntax and try again.")
        );
    }

    #[test]
    fn test_empty_input_is_error() {
        assert_eq!(
            run("   ").message(),
            Some("Please enter some JSON to beautify")
        );
    }

    #[test]
    fn test_stats() {
        let result = run("{\"a\": {\"b\": 1},\n \"c\": 2}");
        let stats = result.stats().unwrap();
        assert_eq!(stats["size"], 19);
        assert_eq!(stats["lines"], 2);
        assert_eq!(stats["objects"], 2);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 Bytes");
        assert_eq!(format_bytes(512), "512 Bytes");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1048576), "1 MB");
    }

    fn arb_json() -> impl Strategy<Value = serde_json::Value> {
        let leaf = prop_oneof![
            Just(serde_json::Value::Null),
            any::<bool>().prop_map(serde_json::Value::Bool),
            any::<i64>().prop_map(|n| serde_json::json!(n)),
            "[a-zA-Z0-9 ]{0,12}".prop_map(serde_json::Value::String),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(serde_json::Value::Array),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..4).prop_map(|m| {
                    serde_json::Value::Object(m.into_iter().collect())
                }),
            ]
        })
    }

    proptest! {
        #[test]
        fn reformatting_is_idempotent(value in arb_json()) {
            let source = serde_json::to_string(&value).unwrap();
            let result = run(&source);
            let reparsed: serde_json::Value =
                serde_json::from_str(result.output().unwrap()).unwrap();
            prop_assert_eq!(reparsed, value);
        }
    }
}
