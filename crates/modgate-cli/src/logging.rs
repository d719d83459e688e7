//! Diagnostic tracing for the CLI.
//!
//! Tracing goes to stderr and is never part of the product output (reports, markdown,
//! annotations), so `RUST_LOG` can be turned up without changing artifacts.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `warn` if unset. Output: stderr, compact format.
///
/// ```bash
/// RUST_LOG=modgate_repo=debug,modgate_app=info modgate scan
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
