//! Debian Haskell Finder
//!
//! Downloads (and caches) a Debian `Packages` index, extracts the Haskell
//! libraries each binary package provides, and reports on them: either the
//! packages providing one library, or an HTML table of all of them.

pub mod cli;
pub mod error;
pub mod logging;

use crate::cli::{HtmlCli, LookupCli, SourceArgs};
use crate::error::{ErrorKind, Result};
use clap::{Command, CommandFactory};
use dhf_cache::{Cache, CacheKey, Fetcher};
use dhf_index::Index;
use dhf_report::HtmlReport;
use exn::ResultExt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::instrument;

/// `dhf`: print the Debian packages providing a Haskell library to `out`.
///
/// Help is printed (and the exit code is a failure) when no package is given.
pub fn run_lookup(cli: &LookupCli, out: impl Write) -> Result<ExitCode> {
    if cli.source.clean {
        return run_clean(&cli.source, out);
    }
    let Some(package) = cli.package.as_deref() else {
        return print_help(LookupCli::command(), out);
    };
    let config = cli.source.load_config()?;
    let cache = cli.source.open_cache(&config)?;
    let matches = lookup(&cache, &cli.source.key(&config), package, out)?;
    tracing::debug!(package, matches, "Lookup finished");
    Ok(ExitCode::SUCCESS)
}

/// `dhf-makehtml`: write the HTML table to the output path. Only `--clean`
/// and help write to `out`.
pub fn run_makehtml(cli: &HtmlCli, out: impl Write) -> Result<ExitCode> {
    if cli.source.clean {
        return run_clean(&cli.source, out);
    }
    let Some(output) = cli.output.as_deref() else {
        return print_help(HtmlCli::command(), out);
    };
    let config = cli.source.load_config()?;
    let cache = cli.source.open_cache(&config)?;
    let rows = make_html(&cache, &cli.source.key(&config), output)?;
    tracing::info!(output = %output.display(), rows, "HTML written");
    Ok(ExitCode::SUCCESS)
}

fn run_clean(source: &SourceArgs, mut out: impl Write) -> Result<ExitCode> {
    let removed = clean(&source.load_cache_dir()?)?;
    writeln!(out, "Cache ({}) cleaned.", removed.display()).or_raise(|| ErrorKind::Io)?;
    Ok(ExitCode::SUCCESS)
}

fn print_help(mut command: Command, mut out: impl Write) -> Result<ExitCode> {
    write!(out, "{}", command.render_help()).or_raise(|| ErrorKind::Io)?;
    Ok(ExitCode::FAILURE)
}

/// Get the decompressed snapshot for `key` (downloading it if needed) and parse it.
#[instrument(skip_all, fields(key = %key))]
pub fn load_index<F: Fetcher>(cache: &Cache<F>, key: &CacheKey) -> Result<Index> {
    let path = cache.get(key).or_raise(|| ErrorKind::Cache)?;
    let index = dhf_index::parse_file(&path).or_raise(|| ErrorKind::Index)?;
    tracing::debug!(path = %path.display(), packages = index.len(), "Loaded package index");
    Ok(index)
}

/// Write one line per Debian package providing `haskell_name`, returning how many were written.
pub fn lookup<F: Fetcher>(cache: &Cache<F>, key: &CacheKey, haskell_name: &str, out: impl Write) -> Result<usize> {
    let index = load_index(cache, key)?;
    dhf_report::write_matches(&index, haskell_name, out).or_raise(|| ErrorKind::Report)
}

/// Render the HTML table for `key` into `output`, returning the number of rows.
#[instrument(skip_all, fields(key = %key, output = %output.display()))]
pub fn make_html<F: Fetcher>(cache: &Cache<F>, key: &CacheKey, output: &Path) -> Result<usize> {
    let index = load_index(cache, key)?;
    let report = HtmlReport::new(&index, key.dist(), key.arch());
    // A template error must not truncate an existing output file.
    let html = report.render().or_raise(|| ErrorKind::Report)?;
    fs::write(output, html).or_raise(|| ErrorKind::Io)?;
    Ok(report.rows().count())
}

/// Remove the cache directory, returning the path that was removed.
pub fn clean(cache_dir: &Path) -> Result<PathBuf> {
    dhf_cache::clean(cache_dir).or_raise(|| ErrorKind::Clean)?;
    Ok(cache_dir.to_path_buf())
}
