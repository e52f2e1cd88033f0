//! Command-line arguments shared by both binaries.

use crate::error::{ErrorKind, Result};
use clap::{Args, Parser};
use dhf_cache::{Cache, CacheKey, Mode};
use dhf_config::Config;
use exn::ResultExt;
use std::path::PathBuf;

/// Selects which package index to read, and how.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Distribution to search in [default: stable]
    #[arg(long)]
    pub dist: Option<String>,
    /// Architecture to search for [default: amd64]
    #[arg(long)]
    pub arch: Option<String>,
    /// Mirror to search in (e.g. ustc, tuna, bfsu) [default: deb.debian.org]
    #[arg(long)]
    pub mirror: Option<String>,
    /// Always download Packages.gz for the current request
    #[arg(long)]
    pub update: bool,
    /// Remove the cache directory; all other arguments are ignored
    #[arg(long)]
    pub clean: bool,
    /// Configuration file [default: ~/.config/dhf/config.toml]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Log what's happening to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
impl SourceArgs {
    pub fn load_config(&self) -> Result<Config> {
        Config::load(self.config.as_deref()).or_raise(|| ErrorKind::Config)
    }

    /// Only the cache directory, which is all `--clean` needs.
    pub fn load_cache_dir(&self) -> Result<PathBuf> {
        Config::load_cache_dir(self.config.as_deref()).or_raise(|| ErrorKind::Config)
    }

    /// The snapshot to read, with omitted options filled in from `config`.
    pub fn key(&self, config: &Config) -> CacheKey {
        CacheKey::new(
            self.mirror.clone(),
            self.dist.clone().unwrap_or_else(|| config.dist.clone()),
            self.arch.clone().unwrap_or_else(|| config.arch.clone()),
        )
    }

    pub fn mode(&self) -> Mode {
        Mode::from(self.update)
    }

    /// An HTTP-backed cache configured from `config`.
    pub fn open_cache(&self, config: &Config) -> Result<Cache> {
        let cache = Cache::new(&config.cache_dir, config.mirrors.clone(), self.mode()).or_raise(|| ErrorKind::Cache)?;
        Ok(cache.with_compression(config.compression))
    }
}

/// Debian Haskell Finder: find Haskell packages in Debian
#[derive(Debug, Parser)]
#[command(name = "dhf", version)]
pub struct LookupCli {
    /// Haskell package name to search for (e.g. aeson)
    pub package: Option<String>,
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Generate an HTML table of the Haskell packages in a Debian distribution
#[derive(Debug, Parser)]
#[command(name = "dhf-makehtml", version)]
pub struct HtmlCli {
    /// HTML output file path
    pub output: Option<PathBuf>,
    #[command(flatten)]
    pub source: SourceArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn test_verify_commands() {
        LookupCli::command().debug_assert();
        HtmlCli::command().debug_assert();
    }

    #[test]
    fn test_lookup_args() {
        let cli = LookupCli::try_parse_from(["dhf", "aeson", "--dist", "sid", "--mirror", "ustc", "--update"]).unwrap();
        assert_eq!(cli.package.as_deref(), Some("aeson"));
        assert_eq!(cli.source.key(&Config::default()), CacheKey::new(Some("ustc"), "sid", "amd64"));
        assert_eq!(cli.source.mode(), Mode::Force);
    }

    #[rstest]
    #[case(&["dhf"])]
    #[case(&["dhf", "--clean"])]
    fn test_package_is_optional(#[case] args: &[&str]) {
        let cli = LookupCli::try_parse_from(args).unwrap();
        assert!(cli.package.is_none());
    }

    #[test]
    fn test_defaults_come_from_config() {
        let cli = HtmlCli::try_parse_from(["dhf-makehtml", "out.html"]).unwrap();
        let config = Config { dist: "testing".to_string(), arch: "arm64".to_string(), ..Config::default() };
        assert_eq!(cli.output, Some(PathBuf::from("out.html")));
        assert_eq!(cli.source.key(&config), CacheKey::new(None::<String>, "testing", "arm64"));
        assert_eq!(cli.source.mode(), Mode::Reuse);
    }
}
