//! Haskell libraries in a Debian `Packages` index.
//!
//! A `Packages` file is a sequence of blank-line separated stanzas, one per
//! binary package. [`parse`] walks it once, line by line, and keeps the
//! packages whose `Provides` field names at least one
//! `libghc-<name>-dev-<version>` virtual package (see [`match_token`]).
//!
//! Only the fields needed for reporting are read: `Package`, `Version`, the
//! one-line `Description` synopsis and `Provides`.

pub mod error;
mod models;
mod parse;
mod provides;

pub use crate::models::{Index, Package, Provide};
pub use crate::parse::{parse, parse_file};
pub use crate::provides::{haskell_libraries, match_token};
