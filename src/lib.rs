//! Developer tools MCP server.
//!
//! Exposes everyday developer utilities (JSON formatting, codecs, hashing,
//! UUID generation, HTTP request testing and more) as Model Context Protocol
//! tools, with session state readable as resources.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, export path validation, the
//!   server handler and its transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: one definition per tool plus the shared `ToolSession`
//!   - **resources**: server info, samples, UUID history and session state
//!
//! # Example
//!
//! ```rust,no_run
//! use devtools_mcp_server::{core::Config, core::McpServer, core::TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone());
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
