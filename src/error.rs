//! Error types for docshelf.

use thiserror::Error;

/// Common error type for docshelf.
#[derive(Error, Debug)]
pub enum DocshelfError {
    /// A client-supplied path failed sanitization or escaped the storage root.
    ///
    /// Always a client error. The message stays generic; the offending input
    /// is logged server-side at the point of detection.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Upload exceeds the configured size limit (in bytes).
    #[error("payload exceeds the {0} byte upload limit")]
    PayloadTooLarge(u64),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for docshelf operations.
pub type Result<T> = std::result::Result<T, DocshelfError>;
