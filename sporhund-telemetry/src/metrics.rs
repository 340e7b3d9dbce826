//! ## sporhund-telemetry::metrics
//! **Prometheus exporter with histograms**
//!
//! ### Components:
//! - `metrics/`: Prometheus exporter with histograms
//! - `logging/`: structured event logging

use prometheus::{Counter, Histogram, HistogramOpts, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: prometheus::Registry,
    pub searches_total: prometheus::Counter,
    pub scan_latency: prometheus::Histogram,
    pub cache_hits: prometheus::Counter,
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        let registry = Registry::new();
        let searches_total =
            Counter::new("sporhund_searches_total", "Total texts searched").unwrap();

        let scan_latency = Histogram::with_opts(
            HistogramOpts::new("sporhund_scan_latency_ns", "Scanner processing time")
                .buckets(vec![1_000.0, 10_000.0, 100_000.0, 1_000_000.0]),
        )
        .unwrap();

        let cache_hits =
            Counter::new("sporhund_cache_hits_total", "Searches served from cache").unwrap();

        registry.register(Box::new(searches_total.clone())).unwrap();
        registry.register(Box::new(scan_latency.clone())).unwrap();
        registry.register(Box::new(cache_hits.clone())).unwrap();

        Self {
            registry,
            searches_total,
            scan_latency,
            cache_hits,
        }
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap())
    }

    pub fn inc_searches(&self) {
        self.searches_total.inc();
    }
}
