//! Timestamp converter tool definition.
//!
//! UNIX seconds to ISO-8601 UTC and back. Years outside `0000..=9999` use the
//! ECMAScript expanded form (`+010000-01-01T00:00:00.000Z`).

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domains::tools::{TextTransform, ToolError, ToolResult};

/// Output shown for an empty input.
pub const NEUTRAL_OUTPUT: &str = "—";

/// Conversion direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimestampMode {
    /// UNIX seconds to ISO date.
    #[default]
    ToDate,
    /// ISO date to UNIX seconds.
    ToTimestamp,
}

impl TimestampMode {
    fn label(self) -> &'static str {
        match self {
            Self::ToDate => "To Date",
            Self::ToTimestamp => "To Timestamp",
        }
    }
}

/// Parameters for the timestamp converter.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TimestampParams {
    /// UNIX seconds (to_date) or a date string (to_timestamp).
    pub input: String,

    /// "to_date" (default) or "to_timestamp".
    #[serde(default)]
    pub mode: TimestampMode,
}

/// Timestamp converter tool.
pub struct TimestampTool;

impl TextTransform for TimestampTool {
    const NAME: &'static str = "timestamp_convert";
    const DESCRIPTION: &'static str = "Convert UNIX seconds to an ISO-8601 UTC date (to_date), or a date \
         (RFC 3339, RFC 2822, YYYY-MM-DD[THH:MM:SS]) to UNIX seconds (to_timestamp).";
    const EXPORT_FILE_NAME: &'static str = "timestamp";
    type Params = TimestampParams;

    #[instrument(skip_all, fields(mode = ?params.mode))]
    fn execute(params: &TimestampParams) -> Result<ToolResult, ToolError> {
        let input = params.input.trim();
        if input.is_empty() {
            return Ok(ToolResult::success(NEUTRAL_OUTPUT));
        }

        let output = match params.mode {
            TimestampMode::ToDate => to_date(input)?,
            TimestampMode::ToTimestamp => to_timestamp(input)?.to_string(),
        };
        debug!("{} -> {}", input, output);

        Ok(ToolResult::success(output).with_stats(serde_json::json!({
            "mode": params.mode.label(),
            "input_length": input.chars().count(),
        })))
    }
}

/// UNIX seconds to `YYYY-MM-DDTHH:MM:SS.sssZ`.
///
/// Like `parseInt`, only the leading integer of the input is read, so
/// `1718932800.5` and `12abc` are accepted.
pub fn to_date(input: &str) -> Result<String, ToolError> {
    let invalid = || ToolError::validation("Please enter a valid UNIX timestamp.");
    let seconds = leading_integer(input).ok_or_else(invalid)?;
    let date = DateTime::<Utc>::from_timestamp(seconds, 0).ok_or_else(invalid)?;
    Ok(format_iso(&date))
}

/// A date string to whole UNIX seconds (floored).
pub fn to_timestamp(input: &str) -> Result<i64, ToolError> {
    parse_date(input.trim())
        .map(|date| date.timestamp())
        .ok_or_else(|| ToolError::validation("Please enter a valid ISO date."))
}

/// Optional sign followed by at least one digit; anything after is ignored.
fn leading_integer(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    let sign_len = trimmed.len() - unsigned.len();
    if sign_len > 1 {
        return None;
    }
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return None;
    }
    trimmed[..sign_len + digits].parse().ok()
}

fn format_iso(date: &DateTime<Utc>) -> String {
    let year = date.year();
    if (0..=9999).contains(&year) {
        return date.to_rfc3339_opts(SecondsFormat::Millis, true);
    }
    let sign = if year < 0 { '-' } else { '+' };
    format!(
        "{}{:06}-{}",
        sign,
        year.unsigned_abs(),
        date.format("%m-%dT%H:%M:%S%.3fZ")
    )
}

fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    parse_expanded_year(input)
        .or_else(|| parse_with_offset(input))
        .map(|date| date.with_timezone(&Utc))
}

/// `±YYYYYY-MM-DD...`: the rest is parsed against a leap anchor year, then
/// the real year is put back in local time.
fn parse_expanded_year(input: &str) -> Option<DateTime<FixedOffset>> {
    let negative = match input.as_bytes().first()? {
        b'+' => false,
        b'-' => true,
        _ => return None,
    };
    let digits = input.get(1..7)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude: i32 = digits.parse().ok()?;
    if negative && magnitude == 0 {
        return None;
    }
    let year = if negative { -magnitude } else { magnitude };

    let anchored = format!("2000{}", input.get(7..)?);
    parse_with_offset(&anchored)?.with_year(year)
}

fn parse_with_offset(input: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(input) {
        return Some(date);
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(input) {
        return Some(date);
    }

    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];
    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;
    Some(naive.and_utc().fixed_offset())
}
