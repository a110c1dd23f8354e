//! UUID generation, history and periodic auto-generation.
//!
//! The stateful pieces ([`UuidHistory`], [`AutoGenerator`]) live in the
//! session; the tools here only drive them.

pub mod auto;
pub mod auto_generate;
pub mod generate;
pub mod generator;
pub mod history;
pub mod manage;

pub use auto::{AutoGenerator, AutoStatus, AutoTransition};
pub use auto_generate::{UuidAutoGenerateParams, UuidAutoGenerateTool};
pub use generate::{UuidGenerateParams, UuidGenerateTool};
pub use generator::UuidGenerator;
pub use history::{HISTORY_LIMIT, HistoryCounts, HistoryEntry, UuidHistory, UuidVersion};
pub use manage::{HistoryAction, UuidHistoryParams, UuidHistoryTool};
