//! Diagnostics go to stderr; stdout is reserved for results.

use std::io;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

const VERBOSE_FILTER: &str = "dhf=debug,dhf_cache=debug,dhf_index=debug,dhf_report=debug,dhf_config=debug";
const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber; call once, at startup. `RUST_LOG`, when
/// set, takes precedence over the `--verbose` flag.
pub fn init(verbose: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let layer = fmt::layer().with_writer(io::stderr).with_target(verbose).without_time();
    tracing_subscriber::registry().with(filter).with(layer).init();
}
