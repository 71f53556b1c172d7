//! Process-wide `tracing` setup for binaries embedding the engine.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Engine decisions at `info`, deck and placement detail stays at `debug`.
pub const DEFAULT_FILTER: &str = "warn,timeline=info,timeline_simulator=info";

fn filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// One JSON object per log line, with the emitting module kept as `target`
/// so engine and simulator lines can be told apart. `RUST_LOG` replaces
/// [`DEFAULT_FILTER`]. Fails if a global subscriber is already installed.
pub fn init_tracing() -> Result<(), TryInitError> {
    let json = fmt::layer()
        .json()
        .with_target(true)
        .with_current_span(false)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter_or(DEFAULT_FILTER))
        .with(json)
        .try_init()
}
