//! ## sporhund-telemetry::logging
//! **Structured logging with `tracing`**
//!
//! ### Components:
//! - `metrics/`: Prometheus exporter with histograms
//! - `logging/`: structured event logging

use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    pub fn init() {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let fmt_layer = fmt::layer()
            .with_target(false)
            .with_thread_names(true)
            .with_span_events(FmtSpan::ENTER);

        let filter_layer = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("info"))
            .unwrap();

        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .init();
    }

    #[inline]
    pub fn log_event(event_type: &str, detail: &str) {
        tracing::info!(event_type = event_type, detail = detail, "Engine event");
    }
}
