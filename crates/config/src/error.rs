//! Configuration Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// One of the configuration layers could not be read or did not match the
    /// expected shape. Fix the file or environment variable named in the message.
    #[display("invalid configuration: {_0}")]
    Invalid(#[error(not(source))] String),
    /// The requested mirror is not in the mirror table.
    #[display("unknown mirror: {_0}")]
    UnknownMirror(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Neither a bad config nor a typo in a mirror name fixes itself.
        false
    }
}
