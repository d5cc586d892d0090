//! Unidad Educativa observability.
//!
//! - Console, error-file and JSON-file logging through `tracing`
//! - Per-request logging middleware with a request id
//! - Prometheus metrics (HTTP and business counters)
//!
//! The file logs and metrics are compiled in with the `observability`
//! feature (default) and can be switched off at runtime with
//! `OBSERVABILITY_ENABLED=false`. Without them only console logging remains
//! and the metric helpers are no-ops.

pub mod basic_logging;
pub mod request_logging;

#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

pub use basic_logging::init_basic_console_logging;
pub use request_logging::logging_middleware;

#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

#[cfg(feature = "observability")]
pub use logging::init_tracing;
#[cfg(feature = "observability")]
pub use metrics::{
    init_metrics, metrics_middleware, track_entity_created, track_entity_deleted,
    track_validation_failure,
};

use std::sync::OnceLock;

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Reads `OBSERVABILITY_ENABLED` once. Enabled unless set to `false` or `0`,
/// and always disabled when the feature is not compiled.
pub fn is_observability_enabled() -> bool {
    cfg!(feature = "observability")
        && *OBSERVABILITY_ENABLED.get_or_init(|| {
            std::env::var("OBSERVABILITY_ENABLED")
                .map(|v| parse_flag(&v))
                .unwrap_or(true)
        })
}

fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    !(value.eq_ignore_ascii_case("false") || value == "0")
}

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{extract::Request, middleware::Next, response::Response};

    /// Console logging only.
    pub fn init_tracing(_log_dir: &str) -> anyhow::Result<()> {
        super::init_basic_console_logging();
        Ok(())
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub fn init_metrics() -> anyhow::Result<Option<()>> {
        Ok(None)
    }

    pub fn track_entity_created(_entity: &str) {}
    pub fn track_entity_deleted(_entity: &str) {}
    pub fn track_validation_failure(_entity: &str, _kind: &str) {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("FALSE"));
        assert!(!parse_flag(" 0 "));
    }
}
