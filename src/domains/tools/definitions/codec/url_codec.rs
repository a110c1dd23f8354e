//! URL encoder/decoder tool definition.
//!
//! Percent-encoding of a single URL component, with the same character set
//! as `encodeURIComponent`.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::domains::tools::definitions::common::CodecMode;
use crate::domains::tools::{TextTransform, ToolError, ToolResult};

const MALFORMED: &str = "Failed to decode input. Invalid URL encoding.";

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Parameters for the URL codec.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UrlCodecParams {
    /// Text to percent-encode, or an encoded string to decode.
    pub input: String,

    /// "encode" (default) or "decode".
    #[serde(default)]
    pub mode: CodecMode,
}

/// URL codec tool.
pub struct UrlCodecTool;

impl TextTransform for UrlCodecTool {
    const NAME: &'static str = "url_codec";
    const DESCRIPTION: &'static str = "Percent-encode text for use in a URL component, or decode a percent-encoded string.";
    const EXPORT_FILE_NAME: &'static str = "url";
    type Params = UrlCodecParams;

    #[instrument(skip_all, fields(mode = ?params.mode))]
    fn execute(params: &UrlCodecParams) -> Result<ToolResult, ToolError> {
        let output = match params.mode {
            CodecMode::Encode => encode(&params.input),
            CodecMode::Decode => decode(&params.input)?,
        };
        debug!("{} produced {} chars", params.mode.label(), output.len());

        Ok(ToolResult::success(output.clone()).with_stats(serde_json::json!({
            "mode": params.mode.label(),
            "input_length": params.input.chars().count(),
            "output_length": output.chars().count(),
        })))
    }
}

pub fn encode(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

/// Decode a percent-encoded string.
///
/// Every `%` must introduce two hex digits and the decoded bytes must be
/// valid UTF-8.
pub fn decode(encoded: &str) -> Result<String, ToolError> {
    let bytes = encoded.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() >= i + 3
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(ToolError::validation(MALFORMED));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    percent_decode_str(encoded)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| ToolError::validation(MALFORMED))
}
