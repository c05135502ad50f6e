//! Logging initialization.
//!
//! Diagnostics go to stderr through `tracing`; command output stays on stdout
//! (see [`crate::output`]). `RUST_LOG` overrides the level picked from `-v`.

use tracing_subscriber::{EnvFilter, fmt};

/// Default filter directive for a `-v` count.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_logging(verbosity: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));
    let installed = fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(verbosity > 1)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!("folio v{} started", env!("CARGO_PKG_VERSION"));
    }
}
