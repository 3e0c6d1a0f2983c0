//! Tracing subscriber setup.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Honors `RUST_LOG`; defaults to `info` for rolewatch crates and `warn`
/// for everything else.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,rolewatch=info,rolewatch_engine=info,rolewatch_snapshot=info,rolewatch_report=info"));

    let fmt_layer = fmt::layer().with_target(true).compact();

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .init();
}
