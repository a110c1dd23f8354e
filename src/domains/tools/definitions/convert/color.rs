//! Color converter tool definition.
//!
//! HEX and `rgb()` are interchangeable inputs; HSL is derived for display.

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::{debug, instrument};

use crate::domains::tools::{TextTransform, ToolError, ToolResult};

static RGB_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$")
        .expect("rgb pattern is valid")
});

/// Input notation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    #[default]
    Hex,
    Rgb,
}

/// Parameters for the color converter.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ColorParams {
    /// Color such as "#3498db", "3498db", "#fff" or "rgb(52, 152, 219)".
    pub input: String,

    /// Notation of `input`: "hex" (default) or "rgb".
    #[serde(default)]
    pub from: ColorFormat,
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse 3 or 6 hex digits, with or without a leading `#`.
    pub fn from_hex(input: &str) -> Result<Self, ToolError> {
        let invalid = || ToolError::validation("Invalid HEX format");
        let digits = input.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(invalid()),
        };
        let value = u32::from_str_radix(&expanded, 16).map_err(|_| invalid())?;
        Ok(Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        })
    }

    /// Parse `rgb(r, g, b)` with components in 0..=255.
    pub fn from_rgb(input: &str) -> Result<Self, ToolError> {
        let invalid = || ToolError::validation("Invalid RGB format");
        let caps = RGB_PATTERN.captures(input.trim()).ok_or_else(invalid)?;
        let channel = |i: usize| -> Result<u8, ToolError> {
            caps[i].parse::<u8>().map_err(|_| invalid())
        };
        Ok(Self {
            r: channel(1)?,
            g: channel(2)?,
            b: channel(3)?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_rgb_string(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Rounded (hue degrees, saturation %, lightness %).
    pub fn to_hsl(self) -> (u32, u32, u32) {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        let (h, s) = if max == min {
            (0.0, 0.0)
        } else {
            let d = max - min;
            let s = if l > 0.5 {
                d / (2.0 - max - min)
            } else {
                d / (max + min)
            };
            let h = if max == r {
                (g - b) / d + if g < b { 6.0 } else { 0.0 }
            } else if max == g {
                (b - r) / d + 2.0
            } else {
                (r - g) / d + 4.0
            };
            (h / 6.0, s)
        };

        (
            (h * 360.0).round() as u32,
            (s * 100.0).round() as u32,
            (l * 100.0).round() as u32,
        )
    }

    pub fn to_hsl_string(self) -> String {
        let (h, s, l) = self.to_hsl();
        format!("hsl({}, {}%, {}%)", h, s, l)
    }
}

/// Color converter tool.
pub struct ColorTool;

impl TextTransform for ColorTool {
    const NAME: &'static str = "color_convert";
    const DESCRIPTION: &'static str = "Convert a color between HEX and rgb() notation. \
         The output also lists the equivalent hsl() for display.";
    const EXPORT_FILE_NAME: &'static str = "color";
    type Params = ColorParams;

    #[instrument(skip_all, fields(from = ?params.from))]
    fn execute(params: &ColorParams) -> Result<ToolResult, ToolError> {
        let color = match params.from {
            ColorFormat::Hex => Rgb::from_hex(&params.input)?,
            ColorFormat::Rgb => Rgb::from_rgb(&params.input)?,
        };
        let (hex, rgb, hsl) = (color.to_hex(), color.to_rgb_string(), color.to_hsl_string());
        debug!("Converted color to {}", hex);

        let output = format!("HEX: {}\nRGB: {}\nHSL: {}", hex, rgb, hsl);
        Ok(ToolResult::success(output).with_stats(serde_json::json!({
            "hex": hex,
            "rgb": rgb,
            "hsl": hsl,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sample_hex() {
        let result = ColorTool::transform(&ColorParams {
            input: "#3498db".to_string(),
            from: ColorFormat::Hex,
        });
        assert_eq!(
            result.output(),
            Some("HEX: #3498db\nRGB: rgb(52, 152, 219)\nHSL: hsl(204, 70%, 53%)")
        );
    }

    #[test]
    fn test_rgb_to_hex() {
        let color = Rgb::from_rgb("rgb( 255 ,0, 0 )").unwrap();
        assert_eq!(color.to_hex(), "#ff0000");
        assert_eq!(color.to_hsl_string(), "hsl(0, 100%, 50%)");
    }

    #[test]
    fn test_short_hex_expands() {
        let color = Rgb::from_hex("FFF").unwrap();
        assert_eq!(color, Rgb { r: 255, g: 255, b: 255 });
        assert_eq!(color.to_hex(), "#ffffff");
    }

    #[test]
    fn test_grey_has_no_hue() {
        assert_eq!(Rgb::from_hex("#808080").unwrap().to_hsl(), (0, 0, 50));
    }

    #[test]
    fn test_invalid_hex() {
        for input in ["#12345", "#ggg", "", "#1234567"] {
            let result = ColorTool::transform(&ColorParams {
                input: input.to_string(),
                from: ColorFormat::Hex,
            });
            assert_eq!(result.message(), Some("Invalid HEX format"), "input {:?}", input);
        }
    }

    #[test]
    fn test_rgb_out_of_range() {
        assert!(Rgb::from_rgb("rgb(256, 0, 0)").is_err());
        assert!(Rgb::from_rgb("rgb(1, 2)").is_err());
    }

    #[test]
    fn test_hex_rgb_agree() {
        let a = Rgb::from_hex("#1abc9c").unwrap();
        let b = Rgb::from_rgb(&a.to_rgb_string()).unwrap();
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn hex_survives_rgb_round_trip(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let hex = Rgb { r, g, b }.to_hex();
            let back = Rgb::from_rgb(&Rgb::from_hex(&hex).unwrap().to_rgb_string()).unwrap();
            prop_assert_eq!(back.to_hex(), hex);
        }
    }
}
