//! Tool-specific error types.

use thiserror::Error;

use crate::services::UpstreamError;

/// Errors that can occur during tool registration and invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// A second handler was registered under an already-used name.
    #[error("Tool already registered: {0}")]
    Duplicate(String),

    /// Invalid or missing tool arguments.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// No credential-extraction strategy produced the named value.
    #[error("Missing required credential: {0}")]
    MissingCredential(&'static str),

    /// The upstream API reported a failure.
    #[error("{0}")]
    Upstream(#[from] UpstreamError),

    /// The tool timed out during execution.
    #[error("Tool execution timed out")]
    Timeout,

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "duplicate registration" error.
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::Duplicate(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Message safe to send back to the caller.
    ///
    /// Internal failures surface only a generic line; the detail stays in
    /// the server log. Every other variant describes an expected failure
    /// and travels as-is.
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}
