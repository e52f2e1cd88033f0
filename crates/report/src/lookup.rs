//! Console lookup of a single Haskell library.

use crate::error::{ErrorKind, Result};
use crate::{NO_DESCRIPTION, UNKNOWN_VERSION};
use dhf_index::Index;
use exn::ResultExt;
use std::io::Write;
use tracing::instrument;

/// Write one line per Debian package that provides `haskell_name` (any
/// version), in index order:
///
/// ```text
/// libghc-aeson-dev 2.1.2.1-1 provides aeson 2.1.2.1: Fast JSON parsing and encoding
/// ```
///
/// Returns how many lines were written; no match writes nothing.
#[instrument(skip(index, out), fields(matches))]
pub fn write_matches(index: &Index, haskell_name: &str, mut out: impl Write) -> Result<usize> {
    let mut matches = 0;
    for (package, provide) in index.providers_of(haskell_name) {
        writeln!(
            out,
            "{} {} provides {}: {}",
            package.name,
            package.version.as_deref().unwrap_or(UNKNOWN_VERSION),
            provide,
            package.description.as_deref().unwrap_or(NO_DESCRIPTION),
        )
        .or_raise(|| ErrorKind::Io)?;
        matches += 1;
    }
    out.flush().or_raise(|| ErrorKind::Io)?;
    tracing::Span::current().record("matches", matches);
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dhf_index::{Package, Provide};
    use rstest::rstest;

    fn index() -> Index {
        [
            Package {
                name: "libghc-foo-dev".to_string(),
                description: Some("Foo for Haskell".to_string()),
                version: Some("1.2.3-1".to_string()),
                provides: vec![Provide::new("foo", "1.2.3")],
            },
            Package {
                name: "libghc-foo-legacy-dev".to_string(),
                description: None,
                version: None,
                provides: vec![Provide::new("foo-legacy", "0.1"), Provide::new("foo", "0.9")],
            },
        ]
        .into_iter()
        .collect()
    }

    fn lookup(target: &str) -> (usize, String) {
        let mut out = Vec::new();
        let count = write_matches(&index(), target, &mut out).unwrap();
        (count, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_match_lines() {
        let (count, out) = lookup("foo");
        assert_eq!(count, 2);
        assert_eq!(
            out,
            "libghc-foo-dev 1.2.3-1 provides foo 1.2.3: Foo for Haskell\n\
             libghc-foo-legacy-dev (unknown version) provides foo 0.9: (no description)\n"
        );
    }

    #[rstest]
    #[case("bar")]
    #[case("fo")]
    #[case("libghc-foo-dev")]
    fn test_no_match_writes_nothing(#[case] target: &str) {
        assert_eq!(lookup(target), (0, String::new()));
    }

    #[test]
    fn test_exact_name_only() {
        let (count, out) = lookup("foo-legacy");
        assert_eq!(count, 1);
        assert!(out.starts_with("libghc-foo-legacy-dev"));
        assert!(out.contains("foo-legacy 0.1"));
    }
}
