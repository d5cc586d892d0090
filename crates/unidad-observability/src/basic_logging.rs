use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub(crate) const DEFAULT_FILTER: &str = "unidad_educativa=info,tower_http=warn,hyper=warn,sqlx=warn";

pub(crate) fn console_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Console-only logging, used when observability is off.
///
/// Filtered by `RUST_LOG`; defaults to `info` for the application and `warn`
/// for noisy dependencies.
pub fn init_basic_console_logging() {
    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(console_filter());

    // A subscriber may already be installed (tests, CLI re-entry).
    let _ = tracing_subscriber::registry().with(console_layer).try_init();

    eprintln!("ℹ️  Observability disabled - console logging only");
}
