//! Logging setup shared by pwdcli binaries
//!
//! Output goes to stderr so it never mixes with listing output on stdout.
//! `RUST_LOG` always wins; otherwise `--verbose` picks the default level.

use tracing_subscriber::EnvFilter;

/// Default filter directive when `RUST_LOG` is not set
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Initialize the global tracing subscriber
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
