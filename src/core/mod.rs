//! Core module containing shared infrastructure components.
//!
//! Shared infrastructure for the MCP server: configuration, errors, export
//! path sandboxing, the server handler and its transports.

pub mod config;
pub mod error;
pub mod security;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use security::{PathSecurityError, resolve_export_target, validate_path};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
