//! Cache Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A cache error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The mirror identifier could not be resolved to a base URL.
    #[display("mirror lookup failed")]
    Mirror,
    /// The HTTP client could not be constructed.
    #[display("failed to initialize HTTP client")]
    Client,
    /// The request never produced a response (DNS, connection refused, reset body).
    #[display("failed to fetch {_0}")]
    Fetch(#[error(not(source))] String),
    /// The mirror answered, but not with a success status.
    #[display("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },
    /// Reading or writing a cache file failed.
    #[display("I/O error: {}", _0.display())]
    Io(#[error(not(source))] PathBuf),
    /// The cached (or just downloaded) snapshot is not valid compressed data.
    /// Re-run with `--update`, or clean the cache.
    #[display("cannot decompress {}", _0.display())]
    Decompress(#[error(not(source))] PathBuf),
    /// The cache directory does not exist.
    #[display("cache directory not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Fetch(_) | Self::Io(_) => true,
            Self::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ErrorKind::Fetch("http://deb.debian.org/".into()), true)]
    #[case(ErrorKind::HttpStatus { url: "http://deb.debian.org/".into(), status: 503 }, true)]
    #[case(ErrorKind::HttpStatus { url: "http://deb.debian.org/".into(), status: 404 }, false)]
    #[case(ErrorKind::Decompress("/tmp/dhf/x.Packages.gz".into()), false)]
    #[case(ErrorKind::Mirror, false)]
    fn test_retryable(#[case] kind: ErrorKind, #[case] expected: bool) {
        assert_eq!(kind.is_retryable(), expected);
    }

    #[test]
    fn test_display() {
        let kind = ErrorKind::HttpStatus { url: "http://deb.debian.org/debian/".into(), status: 404 };
        assert_eq!(kind.to_string(), "HTTP 404 from http://deb.debian.org/debian/");
    }
}
