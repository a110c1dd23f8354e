//! JWT decoder tool definition.
//!
//! Decodes the header and payload segments of a token for inspection. The
//! signature is never verified.

use base64::Engine;
use chrono::Utc;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::base64_codec::FORGIVING;
use crate::domains::tools::definitions::common::pretty_json;
use crate::domains::tools::{TextTransform, ToolError, ToolResult};

/// Parameters for the JWT decoder.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct JwtDecodeParams {
    /// Encoded token (`header.payload.signature`).
    pub token: String,
}

/// Expiration state derived from the payload's `exp` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    Expired,
    Valid { seconds_left: i64 },
    NoExp,
}

impl Expiry {
    fn of(payload: &serde_json::Value, now: i64) -> Self {
        let Some(exp) = payload.get("exp").and_then(serde_json::Value::as_f64) else {
            return Self::NoExp;
        };
        let exp = exp.floor() as i64;
        if exp < now {
            Self::Expired
        } else {
            Self::Valid {
                seconds_left: exp - now,
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Expired => "Expired",
            Self::Valid { .. } => "Valid",
            Self::NoExp => "No Exp",
        }
    }

    fn time_left(self) -> String {
        match self {
            Self::Valid { seconds_left } => format!("{}s", seconds_left),
            _ => "-".to_string(),
        }
    }
}

/// A decoded token.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedJwt {
    pub header: serde_json::Value,
    pub payload: serde_json::Value,
    pub expiry: Expiry,
}

/// JWT decoder tool.
pub struct JwtDecodeTool;

impl TextTransform for JwtDecodeTool {
    const NAME: &'static str = "jwt_decode";
    const DESCRIPTION: &'static str = "Decode the header and payload of a JSON Web Token without verifying \
         its signature. Reports the expiration status derived from the exp claim.";
    const EXPORT_EXTENSION: &'static str = "json";
    const EXPORT_FILE_NAME: &'static str = "jwt-decoded";
    type Params = JwtDecodeParams;

    #[instrument(skip_all, fields(len = params.token.len()))]
    fn execute(params: &JwtDecodeParams) -> Result<ToolResult, ToolError> {
        let decoded = decode_at(&params.token, Utc::now().timestamp())?;
        info!("Decoded JWT, expiry: {}", decoded.expiry.label());

        let output = pretty_json(&serde_json::json!({
            "header": decoded.header,
            "payload": decoded.payload,
        }))?;
        let payload_size = pretty_json(&decoded.payload)?.chars().count();

        Ok(ToolResult::success(output).with_stats(serde_json::json!({
            "token_length": params.token.chars().count(),
            "payload_size": payload_size,
            "exp_status": decoded.expiry.label(),
            "time_left": decoded.expiry.time_left(),
        })))
    }
}

/// Decode `token`, judging expiry against `now` (UNIX seconds).
pub fn decode_at(token: &str, now: i64) -> Result<DecodedJwt, ToolError> {
    if token.is_empty() {
        return Err(ToolError::validation("Please enter a JWT token."));
    }

    let compact: String = token.chars().filter(|c| !c.is_whitespace()).collect();
    let parts: Vec<&str> = compact.split('.').collect();
    let [header, payload, _signature] = parts.as_slice() else {
        return Err(ToolError::validation(
            "Invalid JWT format. Token must have 3 parts separated by dots.",
        ));
    };

    let (Some(header), Some(payload)) = (decode_segment(header), decode_segment(payload)) else {
        return Err(ToolError::validation(
            "Failed to decode JWT parts. Invalid Base64 encoding.",
        ));
    };

    let parse = |text: &str| {
        serde_json::from_str::<serde_json::Value>(text)
            .map_err(|_| ToolError::validation("Failed to parse JWT JSON."))
    };
    let header = parse(&header)?;
    let payload = parse(&payload)?;
    let expiry = Expiry::of(&payload, now);

    Ok(DecodedJwt {
        header,
        payload,
        expiry,
    })
}

/// Base64URL (or standard Base64) segment to UTF-8 text.
fn decode_segment(segment: &str) -> Option<String> {
    let standard: String = segment
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    let bytes = FORGIVING.decode(standard).ok()?;
    String::from_utf8(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
                          eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiZXhwIjoxOTk5OTk5OTk5fQ.\
                          dummy-signature";

    #[test]
    fn test_decode_sample() {
        let decoded = decode_at(SAMPLE, 1_700_000_000).unwrap();
        assert_eq!(decoded.header["alg"], "HS256");
        assert_eq!(decoded.header["typ"], "JWT");
        assert_eq!(decoded.payload["name"], "John Doe");
        assert_eq!(
            decoded.expiry,
            Expiry::Valid {
                seconds_left: 299_999_999
            }
        );
    }

    #[test]
    fn test_expired_token() {
        let decoded = decode_at(SAMPLE, 2_000_000_000).unwrap();
        assert_eq!(decoded.expiry, Expiry::Expired);
    }

    #[test]
    fn test_missing_exp() {
        // {"alg":"none"}.{"sub":"x"}
        let decoded = decode_at("eyJhbGciOiJub25lIn0.eyJzdWIiOiJ4In0.", 0).unwrap();
        assert_eq!(decoded.expiry, Expiry::NoExp);
        assert_eq!(decoded.expiry.label(), "No Exp");
    }

    #[test]
    fn test_whitespace_is_removed() {
        let spaced = SAMPLE.replace('.', " .\n");
        assert!(decode_at(&spaced, 0).is_ok());
    }

    #[test]
    fn test_wrong_part_count() {
        let err = decode_at("a.b", 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid JWT format. Token must have 3 parts separated by dots."
        );
    }

    #[test]
    fn test_bad_base64() {
        let err = decode_at("a.b.c", 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to decode JWT parts. Invalid Base64 encoding."
        );
    }

    #[test]
    fn test_non_json_segment() {
        // "hello" . "world"
        let err = decode_at("aGVsbG8.d29ybGQ.sig", 0).unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse JWT JSON.");
    }

    #[test]
    fn test_empty_token() {
        let result = JwtDecodeTool::transform(&JwtDecodeParams {
            token: String::new(),
        });
        assert_eq!(result.message(), Some("Please enter a JWT token."));
    }

    #[test]
    fn test_output_and_stats() {
        let result = JwtDecodeTool::transform(&JwtDecodeParams {
            token: SAMPLE.to_string(),
        });
        let output: serde_json::Value = serde_json::from_str(result.output().unwrap()).unwrap();
        assert_eq!(output["payload"]["sub"], "1234567890");
        assert_eq!(result.stats().unwrap()["token_length"], SAMPLE.len());
    }
}
