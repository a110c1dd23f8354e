//! Tool definitions module.
//!
//! One file per tool, grouped by concern. Stateless tools implement
//! `TextTransform`; tools that touch the session implement `StatefulTool`.

pub mod codec;
pub mod common;
pub mod convert;
pub mod crypto;
pub mod export;
pub mod net;
pub mod text;
pub mod uuid;

pub use codec::{Base64Tool, JwtDecodeTool, UrlCodecTool};
pub use convert::{ColorTool, TimestampTool};
pub use crypto::{HashTool, PasswordTool};
pub use export::{ExportOutputTool, ExportParams};
pub use net::{ApiTestParams, ApiTestTool};
pub use text::{JsonFormatTool, RegexTestTool, SlugTool};
pub use uuid::{UuidAutoGenerateTool, UuidGenerateTool, UuidHistoryTool};
