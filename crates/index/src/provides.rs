//! Recognising Haskell libraries among a stanza's `Provides` entries.
//!
//! Debian's Haskell packaging policy has every `libghc-*-dev` package provide
//! a virtual package named after the library, its version, and an ABI hash:
//!
//! ```text
//! Provides: libghc-aeson-dev-2.1.2.1-6b1e3, libghc-aeson-dev-2.1.2.1-6b1e3 (= 2.1.2.1-1)
//! ```

use crate::models::Provide;

const PREFIX: &str = "libghc-";
const MARKER: &str = "-dev-";

/// Split a `Provides` value into its bare package names, dropping any
/// version constraint (`foo (= 1.0)` becomes `foo`).
pub fn tokens(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(',')
        .filter_map(|entry| entry.split_whitespace().next())
        .map(|name| name.split_once('(').map_or(name, |(name, _)| name))
        .filter(|name| !name.is_empty())
}

/// Match a single bare token against `libghc-<name>-dev-<version>`.
///
/// `<version>` must start with an ASCII digit and runs to the end of the
/// token. When the marker appears more than once, the last one that is
/// followed by a digit wins, so `libghc-dev-dev-1.0` names the library `dev`.
///
/// ```
/// use dhf_index::{Provide, match_token};
///
/// assert_eq!(match_token("libghc-text-dev-2.0.2"), Some(Provide::new("text", "2.0.2")));
/// assert_eq!(match_token("libghc-text-doc"), None);
/// ```
pub fn match_token(token: &str) -> Option<Provide> {
    let rest = token.strip_prefix(PREFIX)?;
    // Markers may overlap (`-dev-dev-`), so step back one byte short of a
    // full marker rather than using `match_indices`.
    let mut end = rest.len();
    while let Some(at) = rest[..end].rfind(MARKER) {
        let name = &rest[..at];
        let version = &rest[at + MARKER.len()..];
        if !name.is_empty() && version.as_bytes().first().is_some_and(u8::is_ascii_digit) {
            return Some(Provide::new(name, version));
        }
        end = at + MARKER.len() - 1;
    }
    None
}

/// Every Haskell library a `Provides` value declares, in order.
pub fn haskell_libraries(value: &str) -> Vec<Provide> {
    tokens(value).filter_map(match_token).collect()
}
