//! Text tools: JSON formatting, slugs, regex testing.

pub mod json_format;
pub mod slug;

pub use json_format::{JsonFormatParams, JsonFormatTool};
pub use regex_test::{RegexTestParams, RegexTestTool};
pub use slug::{SlugParams, SlugTool};
