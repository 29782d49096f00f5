//! Logging initialization
//!
//! Respects the RUST_LOG environment variable, falling back to the
//! config-file filter, then to "warn" so log lines stay out of the way of
//! interactive output.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber
///
/// Precedence: RUST_LOG, then `filter` (from config or CLI), then "warn".
pub fn init_logging(filter: Option<&str>) {
    let mut env_filter = EnvFilter::from_default_env();

    if std::env::var("RUST_LOG").is_err() {
        env_filter = EnvFilter::new(filter.unwrap_or("warn"));
    }

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_ansi(std::env::var("NO_COLOR").is_err()),
        )
        .with(env_filter)
        .init();
}
