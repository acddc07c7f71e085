//! Error types for the story engine.

use thiserror::Error;

/// Result type for engine operations.
pub type SlasherResult<T> = Result<T, SlasherError>;

/// Errors that can occur while configuring or driving the engine.
#[derive(Debug, Error)]
pub enum SlasherError {
    /// A caller-supplied argument was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An event window failed validation.
    #[error("invalid event window '{label}': {reason}")]
    InvalidWindow {
        /// Label of the offending window.
        label: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A template referenced a participant token that does not exist.
    #[error("unknown token [{token}] in template: {template}")]
    UnknownToken {
        /// The token text without brackets.
        token: String,
        /// The raw template it appeared in.
        template: String,
    },

    /// No slash command is registered under this name.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Reading or writing the settings store failed.
    #[error("settings store: {0}")]
    Settings(String),

    /// Window table or settings JSON could not be parsed.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
