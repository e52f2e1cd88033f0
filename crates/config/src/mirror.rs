//! The table of known Debian mirrors.

use crate::error::{ErrorKind, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PRIMARY_MIRROR: &str = "http://deb.debian.org/debian/";

/// Mirror base URLs, keyed by the short identifier accepted on the
/// command-line (`--mirror ustc`).
///
/// Omitting the identifier selects the [`primary`](Self::primary) mirror.
/// Alternates are plain map entries, so a config file or `DHF_MIRRORS__ALTERNATES__*`
/// environment variable adds new ones without touching the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Mirrors {
    pub primary: String,
    #[serde(default)]
    pub alternates: BTreeMap<String, String>,
}
impl Default for Mirrors {
    fn default() -> Self {
        let alternates = [
            ("ustc", "http://mirrors.ustc.edu.cn/debian/"),
            ("tuna", "http://mirrors.tuna.tsinghua.edu.cn/debian/"),
            ("bfsu", "http://mirrors.bfsu.edu.cn/debian/"),
        ]
        .into_iter()
        .map(|(name, url)| (name.to_string(), url.to_string()))
        .collect();
        Self { primary: PRIMARY_MIRROR.to_string(), alternates }
    }
}
impl Mirrors {
    /// Resolve a mirror identifier to its base URL.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::UnknownMirror`] if `name` is not in the table.
    pub fn resolve(&self, name: Option<&str>) -> Result<&str> {
        match name {
            None => Ok(self.primary.as_str()),
            Some(name) => match self.alternates.get(name) {
                Some(url) => Ok(url.as_str()),
                None => exn::bail!(ErrorKind::UnknownMirror(name.to_string())),
            },
        }
    }
}
