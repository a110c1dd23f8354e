//! Tools domain module.
//!
//! Tools are the executable functions MCP clients call. Each one is a
//! form-to-output transformer: typed parameters in, text output (plus
//! optional stats) or a user-facing error message out.
//!
//! ## Architecture
//!
//! - `transform.rs` - `TextTransform` / `StatefulTool` contracts and the
//!   generic route, metadata and HTTP glue
//! - `session.rs` - per-server state: stored outputs, UUID history,
//!   auto-generation task, API request phase
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - ToolRouter builder for STDIO/TCP transport
//! - `registry.rs` - Tool names, metadata and HTTP dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` implementing `TextTransform`
//!    (or `StatefulTool` if it needs the session)
//! 2. Export it in `definitions/mod.rs`
//! 3. Add its route in `router.rs` and its entries in `registry.rs`
//!
//! **No need to modify `server.rs`!** The router is built dynamically.

pub mod definitions;
mod error;
mod registry;
pub mod router;
pub mod session;
pub mod transform;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
pub use session::{OutputStore, RequestPhase, StoredOutput, ToolContext, ToolSession};
pub use transform::{StatefulTool, TextTransform, ToolResult};
