//! Index Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};

/// An index parsing error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for index parsing.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// Stanza content never produces an error: unrecognised or malformed lines
/// are skipped. Only failing to read the text at all does.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The index could not be read.
    #[display("I/O error reading package index")]
    Io,
    /// The index is not valid UTF-8. Usually a compressed file was passed in
    /// where its decompressed counterpart was expected.
    #[display("package index is not valid UTF-8 (line {line})")]
    Encoding { line: usize },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io)
    }
}
