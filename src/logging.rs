//! Log output for the CLI
//!
//! Logs go to stderr so that stdout stays clean for `--json` output.
//! `RUST_LOG` takes precedence over the verbosity flag.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Map the number of `-v` flags to a log level
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. Call once, before any logging.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level_for(verbosity).as_str().to_lowercase();
        EnvFilter::new(format!("promote_artifacts={level},promote={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
