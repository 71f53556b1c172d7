//! Test-side `tracing` subscriber shared by every test binary in the
//! workspace. Output goes through the libtest writer so it only shows for
//! failing tests (or with `--nocapture`).

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

/// Quiet unless a test asks for more.
pub const DEFAULT_TEST_FILTER: &str = "warn";

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Pick the directive string: `TEST_LOG` beats `RUST_LOG`, which beats
/// [`DEFAULT_TEST_FILTER`]. Blank values count as unset.
pub fn resolve_filter(test_log: Option<String>, rust_log: Option<String>) -> String {
    test_log
        .into_iter()
        .chain(rust_log)
        .find(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TEST_FILTER.to_string())
}

/// Install the subscriber once per process; later calls are no-ops.
///
/// `TEST_LOG=timeline=debug cargo test -p timeline` shows every draw and
/// placement the engine makes.
pub fn init() {
    INSTALLED.get_or_init(|| {
        let directives = resolve_filter(
            std::env::var("TEST_LOG").ok(),
            std::env::var("RUST_LOG").ok(),
        );
        let filter =
            EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_FILTER));

        // Another harness may already own the global subscriber.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .compact()
            .try_init();
    });
}

pub fn is_initialized() -> bool {
    INSTALLED.get().is_some()
}
