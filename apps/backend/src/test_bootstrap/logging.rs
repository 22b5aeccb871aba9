#![cfg(test)]

//! Test logging for the library's own unit tests.
//!
//! Installed once per test binary by the `ctor` hook in `lib.rs`. Output goes
//! through the test writer, so it only shows up for failing tests or with
//! `--nocapture`:
//!
//! ```bash
//! TEST_LOG=rump_backend=debug cargo test -p rump-backend -- --nocapture
//! ```

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Idempotent. The filter comes from `TEST_LOG`, else `RUST_LOG`, else `warn`.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
