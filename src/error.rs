//! Error types for structural parsing

use thiserror::Error;

/// Result type alias for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Failures reported by [`crate::markdown::MarkdownParser`].
///
/// Every failure leaves the previously parsed tree, buffer and derived lists
/// in place, so the caller can retry with a full parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("parser is not initialized (grammar failed to load)")]
    NotInitialized,

    #[error("block grammar produced no tree")]
    ParseFailed,

    #[error("incremental re-parse produced no tree; retry with a full parse")]
    IncrementalParseFailed,

    #[error("invalid edit: {0}")]
    InvalidEdit(String),
}
