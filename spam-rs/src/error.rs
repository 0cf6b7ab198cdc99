//! Error types for spam-rs

use thiserror::Error;

/// Result type alias for spam-rs operations
pub type Result<T> = std::result::Result<T, SpamError>;

/// Errors surfaced outside the classifier core.
///
/// Training and scoring never fail; unreadable corpus sources are skipped
/// and reported through [`crate::corpus::SkippedSource`] instead.
#[derive(Error, Debug)]
pub enum SpamError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model snapshot error
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Background worker failed to complete
    #[error("Worker error: {0}")]
    Worker(String),
}
