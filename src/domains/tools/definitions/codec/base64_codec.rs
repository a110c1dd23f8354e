//! Base64 encoder/decoder tool definition.

use base64::{
    Engine,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig, general_purpose::STANDARD},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::domains::tools::definitions::common::CodecMode;
use crate::domains::tools::{TextTransform, ToolError, ToolResult};

/// Lenient standard-alphabet decoder: padding optional, trailing bits ignored.
pub(crate) const FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Parameters for the Base64 codec.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct Base64Params {
    /// Text to encode, or Base64 to decode.
    pub input: String,

    /// "encode" (default) or "decode".
    #[serde(default)]
    pub mode: CodecMode,
}

/// Base64 codec tool.
pub struct Base64Tool;

impl TextTransform for Base64Tool {
    const NAME: &'static str = "base64_codec";
    const DESCRIPTION: &'static str = "Encode UTF-8 text to Base64, or decode Base64 back to UTF-8 text.";
    const EXPORT_FILE_NAME: &'static str = "base64";
    type Params = Base64Params;

    #[instrument(skip_all, fields(mode = ?params.mode))]
    fn execute(params: &Base64Params) -> Result<ToolResult, ToolError> {
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
    STANDARD.encode(text.as_bytes())
}

/// Decode Base64 into UTF-8 text. ASCII whitespace is ignored.
pub fn decode(encoded: &str) -> Result<String, ToolError> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = FORGIVING
        .decode(compact)
        .map_err(|_| ToolError::validation("Invalid input for the selected mode."))?;
    String::from_utf8(bytes).map_err(|_| ToolError::validation("Invalid input for the selected mode."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run(input: &str, mode: CodecMode) -> ToolResult {
        Base64Tool::transform(&Base64Params {
            input: input.to_string(),
            mode,
        })
    }

    #[test]
    fn test_encode_sample() {
        assert_eq!(
            run("Hello, World!", CodecMode::Encode).output(),
            Some("SGVsbG8sIFdvcmxkIQ==")
        );
    }

    #[test]
    fn test_encode_multibyte() {
        assert_eq!(encode("héllo ✓"), "aMOpbGxvIOKckw==");
    }

    #[test]
    fn test_decode_tolerates_missing_padding_and_whitespace() {
        assert_eq!(decode("SGVsbG8s IFdvcmxkIQ").unwrap(), "Hello, World!");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = run("not base64 ***", CodecMode::Decode);
        assert_eq!(result.message(), Some("Invalid input for the selected mode."));
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        // 0xff 0xfe
        assert!(decode("//4=").is_err());
    }

    #[test]
    fn test_empty_input_encodes_to_empty() {
        assert_eq!(run("", CodecMode::Encode).output(), Some(""));
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(text in any::<String>()) {
            prop_assert_eq!(decode(&encode(&text)).unwrap(), text);
        }
    }
}
