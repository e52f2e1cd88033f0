//! Single-pass scanner over the `Packages` stanza format.

use crate::error::{ErrorKind, Result};
use crate::models::{Index, Package, Provide};
use crate::provides;
use exn::ResultExt;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind as IoErrorKind};
use std::path::Path;
use tracing::instrument;

/// Fields of the stanza currently being read. Everything here is dropped at
/// each blank line, so nothing leaks from one package into the next.
#[derive(Debug, Default)]
struct Pending {
    name: Option<String>,
    description: Option<String>,
    version: Option<String>,
    provides: Vec<Provide>,
}
impl Pending {
    fn feed(&mut self, line: &str) {
        if let Some(value) = field(line, "Package") {
            self.name = Some(value.to_string());
        } else if let Some(value) = field(line, "Version") {
            self.version = Some(value.to_string());
        } else if let Some(value) = field(line, "Description") {
            self.description = Some(value.to_string()).filter(|s| !s.is_empty());
        } else if let Some(value) = field(line, "Provides") {
            // A repeated field replaces the earlier one.
            self.provides = provides::haskell_libraries(value);
        }
    }

    /// Take the stanza read so far, leaving `self` empty for the next one.
    fn finish(&mut self) -> Option<Package> {
        let Pending { name, description, version, provides } = std::mem::take(self);
        if provides.is_empty() {
            return None;
        }
        match name {
            Some(name) => Some(Package { name, description, version, provides }),
            None => {
                tracing::warn!(?provides, "Dropping stanza that provides Haskell libraries but has no Package field");
                None
            },
        }
    }
}

/// `Key: value` with the value trimmed; `None` if `line` is another field.
fn field<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.strip_prefix(key)?.strip_prefix(':').map(str::trim)
}

/// Scan a decompressed `Packages` index, keeping only the packages that
/// provide at least one Haskell library.
///
/// Unrecognised fields, continuation lines and malformed lines are skipped.
/// A final stanza without a trailing blank line is still included.
///
/// ```
/// let text = "Package: libghc-text-dev\nVersion: 2.0.2-1\nProvides: libghc-text-dev-2.0.2-ab12c\n\n\
///             Package: hello\nVersion: 2.10-3\n";
/// let index = dhf_index::parse(text.as_bytes()).unwrap();
/// assert_eq!(index.len(), 1);
/// assert_eq!(index.get("libghc-text-dev").unwrap().provides[0].name, "text");
/// ```
#[instrument(skip(reader), fields(stanzas, packages))]
pub fn parse(reader: impl BufRead) -> Result<Index> {
    let mut index = Index::new();
    let mut pending = Pending::default();
    let mut stanzas = 0usize;
    let mut in_stanza = false;
    for (number, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(err) if err.kind() == IoErrorKind::InvalidData => {
                Err(err).or_raise(|| ErrorKind::Encoding { line: number + 1 })?
            },
            Err(err) => Err(err).or_raise(|| ErrorKind::Io)?,
        };
        if line.trim().is_empty() {
            if in_stanza {
                stanzas += 1;
                in_stanza = false;
            }
            if let Some(package) = pending.finish() {
                index.insert(package);
            }
            continue;
        }
        in_stanza = true;
        pending.feed(&line);
    }
    if in_stanza {
        stanzas += 1;
    }
    if let Some(package) = pending.finish() {
        index.insert(package);
    }
    tracing::Span::current().record("stanzas", stanzas).record("packages", index.len());
    tracing::debug!(stanzas, packages = index.len(), "Package index parsed");
    Ok(index)
}

/// [`parse`] the file at `path`.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn parse_file(path: impl AsRef<Path>) -> Result<Index> {
    let file = File::open(path.as_ref()).or_raise(|| ErrorKind::Io)?;
    parse(BufReader::new(file))
}
