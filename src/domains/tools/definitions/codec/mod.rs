//! Codecs: Base64, URL percent-encoding, JWT inspection.

pub mod base64_codec;
pub mod jwt;
pub mod url_codec;

pub use base64_codec::{Base64Params, Base64Tool};
pub use jwt::{JwtDecodeParams, JwtDecodeTool};
pub use url_codec::{UrlCodecParams, UrlCodecTool};
