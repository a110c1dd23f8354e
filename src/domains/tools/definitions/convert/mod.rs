//! Converters: colors and timestamps.

pub mod color;
pub mod timestamp;

pub use color::{ColorParams, ColorTool};
pub use timestamp::{TimestampParams, TimestampTool};
