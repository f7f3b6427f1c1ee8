//! Error types for Snakk.

use thiserror::Error;

/// Library-level error type for Snakk operations.
#[derive(Error, Debug)]
pub enum SnakkError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("A tool named '{0}' is already registered")]
    DuplicateTool(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for tool '{tool}': {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error("Tool '{tool}' failed: {message}")]
    ToolFailed { tool: String, message: String },

    #[error("Model endpoint unavailable: {0}")]
    Upstream(String),

    #[error("Could not interpret model reply: {0}")]
    MalformedReply(String),

    #[error("Agent exceeded maximum iterations ({0})")]
    LoopBudgetExceeded(usize),

    #[error("Checkpoint store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type alias for Snakk operations.
pub type Result<T> = std::result::Result<T, SnakkError>;
