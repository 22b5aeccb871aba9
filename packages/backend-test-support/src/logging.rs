//! Quiet, capture-friendly tracing for integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Level used when neither `TEST_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Resolve the filter directive: `TEST_LOG`, then `RUST_LOG`, then [`DEFAULT_DIRECTIVE`].
pub fn directive() -> String {
    std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| DEFAULT_DIRECTIVE.to_string())
}

/// Install the test subscriber once per binary. Later calls are no-ops, and
/// a subscriber installed by someone else wins.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        fmt()
            .with_env_filter(EnvFilter::new(directive()))
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
