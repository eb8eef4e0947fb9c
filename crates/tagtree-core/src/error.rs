//! Error types for tagged-tree encoding and decoding operations.

use thiserror::Error;

/// Errors that can occur at the string-level entry points.
///
/// Everything below the document root follows the degradation policy in
/// [`crate::decoder`]: bad nodes produce diagnostics and placeholders, never
/// errors.
#[derive(Error, Debug)]
pub enum TagTreeError {
    /// The input string was not valid JSON (or a value failed to serialize).
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document root must be a JSON object (a compound); anything else
    /// has no tagged-tree equivalent at the top level.
    #[error("expected a JSON object at the document root, found {0}")]
    RootNotObject(&'static str),
}

/// Convenience alias used throughout tagtree-core.
pub type Result<T> = std::result::Result<T, TagTreeError>;
