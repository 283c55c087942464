//! Logging setup for harness binaries.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Install a `tracing` subscriber filtered by `RUST_LOG`, defaulting to `warn`.
///
/// Output goes to stderr so stdout carries nothing but the summary line. Calling this more than
/// once, or after another subscriber was installed, is a no-op. Colours are used only when stderr
/// is a terminal.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();
}
