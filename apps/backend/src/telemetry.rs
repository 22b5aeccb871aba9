use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber, filtered by `RUST_LOG` or `default_directive`.
///
/// `json` switches from human-readable lines to one JSON object per event.
/// Returns false if a global subscriber was already installed.
pub fn init_tracing(default_directive: &str, json: bool) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.with_ansi(false).json())
            .try_init()
            .is_ok()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .is_ok()
    }
}
