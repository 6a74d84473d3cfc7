//! Tool-specific error types.

use rmcp::ErrorData as McpError;
use thiserror::Error;

/// Host-level tool errors.
///
/// These are raised before a handler runs (unknown tool, arguments that do
/// not match the schema) or while the tool table is being built. Handler
/// failures are not `ToolError`s: they travel inside the result envelope.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    /// A tool with the same name is already registered.
    #[error("Tool already registered: {0}")]
    Duplicate(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            reason: reason.into(),
        }
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::NotFound(_) | ToolError::InvalidArguments { .. } => {
                McpError::invalid_params(err.to_string(), None)
            }
            ToolError::Duplicate(_) => McpError::internal_error(err.to_string(), None),
        }
    }
}
