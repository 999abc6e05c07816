//! Tracing setup for the launcher.
//!
//! Diagnostics go to stderr so stdout stays reserved for command output.
//! Verbosity is controlled with `RUST_LOG`.

use std::io::IsTerminal;

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber.
///
/// Reads `RUST_LOG` env var. Defaults to `info` if unset.
/// Output: stderr, compact format; colors only when stderr is a terminal so
/// captured logs stay plain text.
///
/// # Example
/// ```bash
/// RUST_LOG=launcher=debug launcher load workflow.yaml log
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .compact(),
        )
        .init();
}

/// Log a section header marking the start of a loading phase.
pub fn separator(title: &str) {
    info!("---------- {title} ----------");
}
