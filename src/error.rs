//! Top-level Error Types
//!
//! Wraps the error trees of each crate under one kind per pipeline stage.

use derive_more::{Display, Error};

/// A dhf error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for dhf operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("could not load configuration")]
    Config,
    #[display("could not obtain package index")]
    Cache,
    #[display("could not read package index")]
    Index,
    #[display("could not produce report")]
    Report,
    #[display("could not clean cache directory")]
    Clean,
    #[display("I/O error")]
    Io,
}
