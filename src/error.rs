//! Error types for quillspan.
//!
//! Span and history operations never fail: invalid ranges are no-ops and
//! out-of-bounds queries answer `false`. Errors only surface at the edges,
//! when an editor is configured or when a caller hands in a color string.

use thiserror::Error;

/// Result type alias for quillspan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for quillspan operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// History is enabled but configured to hold no snapshots.
    #[error("history size must be greater than 0 when history is enabled (got {size})")]
    InvalidHistorySize { size: usize },
    /// Invalid color format (e.g., malformed hex string or unknown name).
    #[error("invalid color format: {0}")]
    InvalidColor(String),
}
