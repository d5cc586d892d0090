use std::fs;

use anyhow::Context;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::basic_logging::{console_filter, init_basic_console_logging};
use crate::is_observability_enabled;

/// Installs the global subscriber.
///
/// With observability on: compact console output filtered by `RUST_LOG`, a
/// daily `unidad-educativa.log` with errors only, and a daily
/// `unidad-educativa.json` with structured `info` events, both under
/// `log_dir`. With observability off this falls back to
/// [`init_basic_console_logging`].
pub fn init_tracing(log_dir: &str) -> anyhow::Result<()> {
    if !is_observability_enabled() {
        init_basic_console_logging();
        return Ok(());
    }

    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create logs directory {log_dir}"))?;

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter());

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "unidad-educativa.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    let json_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "unidad-educativa.json");
    let json_layer = fmt::layer()
        .json()
        .with_writer(json_appender)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    info!(log_dir, "Tracing initialized with file logging");
    Ok(())
}
