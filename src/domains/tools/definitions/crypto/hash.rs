//! Hash generator tool definition.

use md5::Md5;
use schemars::JsonSchema;
use serde::Deserialize;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument};

use crate::domains::tools::{TextTransform, ToolError, ToolResult};

/// Parameters for the hash generator.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct HashParams {
    /// Text to hash (UTF-8).
    pub input: String,

    /// MD5, SHA1, SHA256 or SHA512 (default: SHA256). Case-insensitive,
    /// dashed forms like "SHA-256" are accepted.
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

fn default_algorithm() -> String {
    "SHA256".to_string()
}

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    /// Lowercase hex digest of `input`.
    pub fn digest(self, input: &[u8]) -> String {
        match self {
            Self::Md5 => hex_digest::<Md5>(input),
            Self::Sha1 => hex_digest::<Sha1>(input),
            Self::Sha256 => hex_digest::<Sha256>(input),
            Self::Sha512 => hex_digest::<Sha512>(input),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_uppercase();
        match normalized.as_str() {
            "MD5" => Ok(Self::Md5),
            "SHA1" => Ok(Self::Sha1),
            "SHA256" => Ok(Self::Sha256),
            "SHA512" => Ok(Self::Sha512),
            _ => Err(ToolError::validation(format!("Unsupported algorithm: {}", s))),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha512 => "SHA512",
        };
        f.write_str(name)
    }
}

fn hex_digest<D: Digest>(input: &[u8]) -> String {
    hex::encode(D::digest(input))
}

/// Hash generator tool.
pub struct HashTool;

impl TextTransform for HashTool {
    const NAME: &'static str = "hash_generate";
    const DESCRIPTION: &'static str = "Compute the MD5, SHA1, SHA256 or SHA512 digest of UTF-8 text as lowercase hex.";
    const EXPORT_FILE_NAME: &'static str = "hash";
    type Params = HashParams;

    #[instrument(skip_all, fields(algorithm = %params.algorithm))]
    fn execute(params: &HashParams) -> Result<ToolResult, ToolError> {
        if params.input.is_empty() {
            return Err(ToolError::validation("Input text is required."));
        }
        let algorithm: HashAlgorithm = params.algorithm.parse()?;

        let hash = algorithm.digest(params.input.as_bytes());
        debug!("{} digest computed", algorithm);

        Ok(ToolResult::success(hash).with_stats(serde_json::json!({
            "length": params.input.chars().count(),
            "algorithm": algorithm.to_string(),
            "status": "Generated",
        })))
    }
}
