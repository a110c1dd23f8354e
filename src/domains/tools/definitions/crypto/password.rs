//! Password generator tool definition.
//!
//! Draws each character uniformly from the union of the selected classes.

use rand::Rng;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::domains::tools::{TextTransform, ToolError, ToolResult};

pub const MIN_LENGTH: usize = 4;
pub const MAX_LENGTH: usize = 64;

const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()-_=+[]{}|;:,.<>?/";

/// Parameters for the password generator.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PasswordParams {
    /// Password length, clamped to 4..=64 (default: 16).
    #[serde(default = "default_length")]
    pub length: usize,

    /// Include A-Z (default: true).
    #[serde(default = "default_true")]
    pub uppercase: bool,

    /// Include a-z (default: true).
    #[serde(default = "default_true")]
    pub lowercase: bool,

    /// Include 0-9 (default: true).
    #[serde(default = "default_true")]
    pub numbers: bool,

    /// Include punctuation symbols (default: true).
    #[serde(default = "default_true")]
    pub symbols: bool,
}

fn default_length() -> usize {
    16
}

fn default_true() -> bool {
    true
}

impl PasswordParams {
    /// The selected character classes, in fixed order.
    fn classes(&self) -> Vec<&'static str> {
        [
            (self.uppercase, UPPER),
            (self.lowercase, LOWER),
            (self.numbers, DIGITS),
            (self.symbols, SYMBOLS),
        ]
        .into_iter()
        .filter_map(|(on, set)| on.then_some(set))
        .collect()
    }
}

/// Strength rating of a generated password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Complexity {
    Weak,
    Moderate,
    Strong,
}

impl Complexity {
    pub fn rate(classes: usize, length: usize) -> Self {
        if classes >= 3 && length >= 12 {
            Self::Strong
        } else if classes >= 2 && length >= 8 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Weak => "Weak",
            Self::Moderate => "Moderate",
            Self::Strong => "Strong",
        }
    }
}

/// Password generator tool.
pub struct PasswordTool;

impl TextTransform for PasswordTool {
    const NAME: &'static str = "password_generate";
    const DESCRIPTION: &'static str = "Generate a random password from the selected character classes \
         (uppercase, lowercase, numbers, symbols). Length is clamped to 4..64.";
    const EXPORT_FILE_NAME: &'static str = "password";
    type Params = PasswordParams;

    #[instrument(skip_all, fields(length = params.length))]
    fn execute(params: &PasswordParams) -> Result<ToolResult, ToolError> {
        let classes = params.classes();
        if classes.is_empty() {
            return Err(ToolError::configuration(
                "Please select at least one character set.",
            ));
        }

        let length = params.length.clamp(MIN_LENGTH, MAX_LENGTH);
        let password = generate(&classes.concat(), length, &mut rand::thread_rng());
        let complexity = Complexity::rate(classes.len(), length);
        debug!("Generated {} password of {} chars", complexity.label(), length);

        Ok(ToolResult::success(password).with_stats(serde_json::json!({
            "length": length,
            "complexity": complexity.label(),
            "charset": classes.len(),
        })))
    }
}

/// Draw `length` characters from `alphabet`.
pub fn generate<R: Rng + ?Sized>(alphabet: &str, length: usize, rng: &mut R) -> String {
    let chars: Vec<char> = alphabet.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    (0..length)
        .map(|_| chars[rng.gen_range(0..chars.len())])
        .collect()
}
