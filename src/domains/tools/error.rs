//! Tool-specific error types.

use thiserror::Error;

/// Errors raised by the tool layer itself, outside any calculation.
///
/// Calculation failures never become a `ToolError`: they are rendered into
/// the tool result as `"Error: <message>"`.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// The argument payload was not a JSON object.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the failure is on the server side rather than in the request.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }
}
