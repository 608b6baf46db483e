//! Error types for coffeeconnection
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur while scheduling coffee chats
#[derive(Debug, Error)]
pub enum CoffeeError {
    /// Missing or malformed configuration
    #[error("Config error: {0}")]
    Config(String),

    /// A pair that would break the match invariants
    #[error("Invalid match: {0}")]
    InvalidMatch(String),

    /// Operation called with inputs the caller must have ruled out
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// History file could not be read or written
    #[error("History error: {0}")]
    History(String),

    /// Slack API error
    #[error("Slack error: {0}")]
    Slack(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for coffeeconnection operations
pub type Result<T> = std::result::Result<T, CoffeeError>;
