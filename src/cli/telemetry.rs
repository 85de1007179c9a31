use anyhow::{Context, Result};
use env_logger::{Builder, Target};
use log::LevelFilter;

/// Map the `-v` count to the level used for this crate's own logs
#[must_use]
pub const fn level_from_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initialize logging to stderr
///
/// `RUST_LOG` is honored; a non-zero verbosity overrides it for this crate.
/// Stdout stays reserved for reports.
///
/// # Errors
///
/// Returns an error if a logger has already been installed
pub fn init(verbosity: u8) -> Result<()> {
    let mut builder = Builder::new();
    builder.filter_level(LevelFilter::Warn);
    builder.parse_default_env();

    if verbosity > 0 {
        builder.filter_module("certinfo", level_from_verbosity(verbosity));
    }

    builder
        .target(Target::Stderr)
        .format_timestamp_millis()
        .try_init()
        .context("failed to initialize logger")
}
