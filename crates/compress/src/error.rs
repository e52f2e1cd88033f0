//! Errors from encoding and decoding snapshots.

use derive_more::{Display, Error};

/// A compression error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Not a complete stream in the expected format: a truncated download, or
    /// an error page served in place of the index.
    #[display("not valid compressed data")]
    InvalidData,
    #[display("unknown compression format {_0:?}")]
    UnsupportedFormat(#[error(not(source))] String),
    /// Known, but this build was compiled without it.
    #[display("compression format {_0:?} is not enabled in this build")]
    DisabledFormat(#[error(not(source))] String),
    #[display("could not encode data")]
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io)
    }
}
