//! Reports over a parsed [`Index`](dhf_index::Index).
//!
//! - [`write_matches`]: which Debian packages provide a given Haskell library.
//! - [`HtmlReport`]: a static HTML table of every library in the index.

pub mod error;
mod html;
mod lookup;

pub use crate::html::HtmlReport;
pub use crate::lookup::write_matches;

/// Shown in place of a missing `Version` field.
pub const UNKNOWN_VERSION: &str = "(unknown version)";
/// Shown in place of a missing `Description` field.
pub const NO_DESCRIPTION: &str = "(no description)";
