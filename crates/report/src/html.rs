//! Static HTML table of every Haskell library in an index.

use crate::error::{ErrorKind, Result};
use crate::{NO_DESCRIPTION, UNKNOWN_VERSION};
use dhf_index::{Index, Package};
use exn::ResultExt;
use std::collections::HashMap;
use std::fmt::Write as _;
use tracing::instrument;
use upon::fmt::Formatter;
use upon::{Engine, Value};

const TEMPLATE: &str = include_str!("../templates/index.html");

/// The index turned inside out: one row per `"<library> <version>"`, pointing
/// at the Debian package that provides it.
///
/// When two packages provide the same library *and* version, the one seen
/// last owns the row and the other is not listed. The row stays where the
/// key first appeared.
#[derive(Debug)]
pub struct HtmlReport<'a> {
    title: String,
    rows: Vec<(String, &'a Package)>,
}
impl<'a> HtmlReport<'a> {
    pub fn new(index: &'a Index, dist: &str, arch: &str) -> Self {
        let mut rows: Vec<(String, &'a Package)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for package in index {
            for provide in &package.provides {
                let key = provide.to_string();
                match positions.get(&key) {
                    Some(&position) => {
                        tracing::debug!(%key, kept = %package.name, dropped = %rows[position].1.name, "Duplicate library version");
                        rows[position].1 = package;
                    },
                    None => {
                        positions.insert(key.clone(), rows.len());
                        rows.push((key, package));
                    },
                }
            }
        }
        Self { title: format!("Debian Haskell Packages for {dist} {arch}"), rows }
    }

    /// `("<library> <version>", package)` pairs in table order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &'a Package)> + '_ {
        self.rows.iter().map(|(key, package)| (key.as_str(), *package))
    }

    /// Render the complete document. Every interpolated value is HTML-escaped.
    #[instrument(skip(self), fields(rows = self.rows.len()))]
    pub fn render(&self) -> Result<String> {
        let mut engine = Engine::new();
        engine.set_default_formatter(&escape_html);
        let template = engine.compile(TEMPLATE).or_raise(|| ErrorKind::Template)?;
        template.render(&engine, self.context()).to_string().or_raise(|| ErrorKind::Template)
    }

    fn context(&self) -> Value {
        let rows: Vec<Value> = self
            .rows
            .iter()
            .map(|(key, package)| {
                upon::value! {
                    haskell: key.as_str(),
                    package: package.name.as_str(),
                    version: package.version.as_deref().unwrap_or(UNKNOWN_VERSION),
                    description: package.description.as_deref().unwrap_or(NO_DESCRIPTION),
                }
            })
            .collect();
        upon::value! {
            title: self.title.as_str(),
            rows: Value::List(rows),
        }
    }
}

/// Default formatter for the report template: strings are HTML-escaped,
/// everything else is formatted as usual.
fn escape_html(f: &mut Formatter<'_>, value: &Value) -> upon::fmt::Result {
    let Value::String(text) = value else {
        return upon::fmt::default(f, value);
    };
    let mut rest = text.as_str();
    while let Some(at) = rest.find(['&', '<', '>', '"', '\'']) {
        f.write_str(&rest[..at])?;
        f.write_str(match rest.as_bytes()[at] {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            _ => "&#39;",
        })?;
        rest = &rest[at + 1..];
    }
    f.write_str(rest)?;
    Ok(())
}
