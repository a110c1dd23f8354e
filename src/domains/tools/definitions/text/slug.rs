//! Slug generator tool definition.
//!
//! Turns free text into a URL-safe token: transliterate, drop disallowed
//! characters, collapse whitespace into the replacement string.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::domains::tools::{TextTransform, ToolError, ToolResult};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the slug generator.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SlugParams {
    /// Text to turn into a slug.
    pub text: String,

    /// Lowercase the result (default: true).
    #[serde(default = "default_true")]
    pub lower: bool,

    /// Keep only ASCII letters and digits between separators (default: true).
    #[serde(default = "default_true")]
    pub strict: bool,

    /// Separator placed between words (default: "-").
    #[serde(default = "default_replacement")]
    pub replacement: String,
}

fn default_true() -> bool {
    true
}

fn default_replacement() -> String {
    "-".to_string()
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Slug generator tool.
pub struct SlugTool;

impl TextTransform for SlugTool {
    const NAME: &'static str = "slug_generate";
    const DESCRIPTION: &'static str = "Generate a URL-friendly slug from text. \
         Options: lower (lowercase), strict (alphanumerics only), replacement (separator).";
    const EXPORT_FILE_NAME: &'static str = "slug-generation";
    type Params = SlugParams;

    #[instrument(skip_all, fields(len = params.text.len()))]
    fn execute(params: &SlugParams) -> Result<ToolResult, ToolError> {
        // Blank input disables the action: nothing to slugify.
        if params.text.trim().is_empty() {
            return Ok(ToolResult::success(""));
        }

        let slug = slugify(&params.text, params.lower, params.strict, &params.replacement);
        debug!("Generated slug of {} chars", slug.chars().count());

        let words = params.text.split_whitespace().count();
        Ok(ToolResult::success(slug.clone()).with_stats(serde_json::json!({
            "chars": params.text.chars().count(),
            "words": words,
            "slug_length": slug.chars().count(),
            "preview_url": format!("https://example.com/{}", slug),
        })))
    }
}

/// Slugify `text` with the given options.
pub fn slugify(text: &str, lower: bool, strict: bool, replacement: &str) -> String {
    let mut slug = String::with_capacity(text.len());

    for ch in text.chars() {
        let mapped = transliterate(ch);
        let mapped_str: String = match mapped {
            Some(s) => s.to_string(),
            None => ch.to_string(),
        };

        // A literal separator in the input counts as a word break.
        if !replacement.is_empty() && mapped_str == replacement {
            slug.push(' ');
            continue;
        }

        slug.extend(mapped_str.chars().filter(|c| is_kept(*c)));
    }

    if strict {
        slug.retain(|c| c.is_ascii_alphanumeric() || c.is_whitespace());
    }

    let joined = slug.split_whitespace().collect::<Vec<_>>().join(replacement);

    if lower { joined.to_lowercase() } else { joined }
}

/// Characters that survive the default removal pass.
fn is_kept(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || matches!(
            c,
            '_' | '$' | '*' | '+' | '~' | '.' | '(' | ')' | '\'' | '"' | '!' | '-' | ':' | '@'
        )
}

/// ASCII replacement for symbols and accented letters.
fn transliterate(ch: char) -> Option<&'static str> {
    let mapped = match ch {
        '&' => "and",
        '$' => "dollar",
        '%' => "percent",
        '<' => "less",
        '>' => "greater",
        '|' => "or",
        '¢' => "cent",
        '£' => "pound",
        '¤' => "currency",
        '¥' => "yen",
        '€' => "euro",
        '©' => "(c)",
        '®' => "(r)",
        '™' => "tm",
        '∞' => "infinity",
        '♥' => "love",
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' | 'Ă' | 'Ą' => "A",
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' | 'ª' => "a",
        'Æ' => "AE",
        'æ' => "ae",
        'Ç' | 'Ć' | 'Ĉ' | 'Ċ' | 'Č' => "C",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'Ð' | 'Ď' | 'Đ' => "D",
        'ð' | 'ď' | 'đ' => "d",
        'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => "E",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'Ĝ' | 'Ğ' | 'Ġ' | 'Ģ' => "G",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'Ĥ' | 'Ħ' => "H",
        'ĥ' | 'ħ' => "h",
        'Ì' | 'Í' | 'Î' | 'Ï' | 'Ĩ' | 'Ī' | 'Ĭ' | 'Į' | 'İ' => "I",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'Ĵ' => "J",
        'ĵ' => "j",
        'Ķ' => "K",
        'ķ' => "k",
        'Ĺ' | 'Ļ' | 'Ľ' | 'Ŀ' | 'Ł' => "L",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
        'Ñ' | 'Ń' | 'Ņ' | 'Ň' => "N",
        'ñ' | 'ń' | 'ņ' | 'ň' => "n",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'Ō' | 'Ŏ' | 'Ő' => "O",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' | 'º' => "o",
        'Œ' => "OE",
        'œ' => "oe",
        'Ŕ' | 'Ŗ' | 'Ř' => "R",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'Ś' | 'Ŝ' | 'Ş' | 'Š' => "S",
        'ś' | 'ŝ' | 'ş' | 'š' => "s",
        'ß' => "ss",
        'Ţ' | 'Ť' | 'Ŧ' => "T",
        'ţ' | 'ť' | 'ŧ' => "t",
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' => "U",
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'Ŵ' => "W",
        'ŵ' => "w",
        'Ý' | 'Ŷ' | 'Ÿ' => "Y",
        'ý' | 'ÿ' | 'ŷ' => "y",
        'Ź' | 'Ż' | 'Ž' => "Z",
        'ź' | 'ż' | 'ž' => "z",
        'Þ' => "TH",
        'þ' => "th",
        _ => return None,
    };
    Some(mapped)
}

// ============================================================================
// Tests
// ============================================================================
