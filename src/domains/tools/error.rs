//! Tool-specific error types.

use thiserror::Error;

/// Errors that can occur during tool operations.
///
/// The first three variants are the user-facing taxonomy: their display text
/// is the bare message shown to the client.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Malformed input for the selected transform.
    #[error("{0}")]
    Validation(String),

    /// A required option was not selected.
    #[error("{0}")]
    Configuration(String),

    /// Outbound request failure (API tester only).
    #[error("{0}")]
    Network(String),

    /// A named item (a tool, a history entry) does not exist.
    #[error("{what} not found: {name}")]
    NotFound { what: &'static str, name: String },

    /// Filesystem failure while exporting.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a new network error.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a new "not found" error.
    pub fn not_found(what: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            what,
            name: name.into(),
        }
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Short category label used in logs and structured output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Configuration(_) => "configuration",
            Self::Network(_) => "network",
            Self::NotFound { .. } => "not_found",
            Self::Io(_) => "io",
            Self::Internal(_) => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_messages_are_bare() {
        assert_eq!(
            ToolError::validation("Invalid HEX format").to_string(),
            "Invalid HEX format"
        );
        assert_eq!(
            ToolError::network("Network error or invalid URL.").to_string(),
            "Network error or invalid URL."
        );
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(ToolError::configuration("x").kind(), "configuration");
        assert_eq!(ToolError::not_found("Tool", "x").kind(), "not_found");
        assert_eq!(ToolError::not_found("Tool", "x").to_string(), "Tool not found: x");
    }
}
