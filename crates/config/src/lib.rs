//! Layered configuration for dhf.
//!
//! Values are resolved with [`figment`], lowest precedence first:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. A TOML file, either given explicitly or `config.toml` in the platform
//!    config directory (`~/.config/dhf/config.toml` on Linux)
//! 3. Environment variables prefixed with `DHF_`, using `__` to reach nested
//!    keys (`DHF_MIRRORS__ALTERNATES__LOCAL=http://localhost/debian/`)
//!
//! ```toml
//! cache_dir = "/var/cache/dhf"
//! dist = "testing"
//! compression = "gzip"
//!
//! [mirrors.alternates]
//! local = "http://localhost:8080/debian/"
//! ```

pub mod error;
mod mirror;

use crate::error::{ErrorKind, Result};
pub use crate::mirror::{Mirrors, PRIMARY_MIRROR};
use dhf_compress::Compression;
use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;

const APPLICATION: &str = "dhf";
const CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "DHF_";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Where downloaded index snapshots are kept. Removed wholesale by `--clean`.
    pub cache_dir: PathBuf,
    /// Distribution searched when `--dist` is omitted.
    pub dist: String,
    /// Architecture searched when `--arch` is omitted.
    pub arch: String,
    /// Which `Packages` variant to download from the mirror.
    pub compression: Compression,
    pub mirrors: Mirrors,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            dist: "stable".to_string(),
            arch: "amd64".to_string(),
            compression: Compression::Gzip,
            mirrors: Mirrors::default(),
        }
    }
}
impl Config {
    /// Load configuration from defaults, a TOML file and the environment.
    ///
    /// An explicitly requested `file` must exist; the default location is
    /// optional.
    #[instrument]
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let file = config_file(file)?;
        let config: Self = Self::figment(file.as_deref())
            .extract()
            .map_err(|err| exn::Exn::from(ErrorKind::Invalid(err.to_string())))?;
        tracing::debug!(cache_dir = %config.cache_dir.display(), "Configuration loaded");
        Ok(config)
    }

    /// Resolve only `cache_dir` through the same layers as [`load`](Self::load).
    /// Invalid values elsewhere in the configuration are not looked at.
    #[instrument]
    pub fn load_cache_dir(file: Option<&Path>) -> Result<PathBuf> {
        let file = config_file(file)?;
        Self::figment(file.as_deref())
            .extract_inner("cache_dir")
            .map_err(|err| exn::Exn::from(ErrorKind::Invalid(err.to_string())))
    }

    /// The provider stack behind [`load`](Self::load), exposed so callers
    /// can merge further layers of their own.
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(file) = file {
            figment = figment.merge(Toml::file(file));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}

/// `~/.cache/dhf` on Linux, falling back to the system temporary directory
/// when no home directory can be determined.
pub fn default_cache_dir() -> PathBuf {
    ProjectDirs::from("", "", APPLICATION)
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join(APPLICATION))
}

pub fn default_config_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", APPLICATION).map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

fn config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) if !path.is_file() => {
            exn::bail!(ErrorKind::Invalid(format!("config file not found: {}", path.display())))
        },
        Some(path) => Ok(Some(path.to_path_buf())),
        None => Ok(default_config_file()),
    }
}
