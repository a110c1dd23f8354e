//! Outbound HTTP.

pub mod api_tester;

pub use api_tester::{ApiTestParams, ApiTestTool};
