//! Prometheus metrics registry.
//!
//! Only one metric is tracked: `app_requests_total`, bumped once per
//! `GET /`. The counter is atomic and never decreases; it resets only when
//! the process restarts.

use prometheus_client::encoding::text::encode;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::registry::Registry;

/// Content-Type of the text produced by [`Metrics::render`].
pub const METRICS_CONTENT_TYPE: &str = "application/openmetrics-text; version=1.0.0; charset=utf-8";

/// Registered name; the encoder appends the `_total` suffix for counters.
const REQUESTS_METRIC: &str = "app_requests";
const REQUESTS_HELP: &str = "Total HTTP Requests";

pub struct Metrics {
    registry: Registry,
    requests_total: Counter,
}

impl Metrics {
    pub fn new() -> Self {
        let mut registry = Registry::default();
        let requests_total: Counter = Counter::default();
        registry.register(REQUESTS_METRIC, REQUESTS_HELP, requests_total.clone());

        Self {
            registry,
            requests_total,
        }
    }

    /// Count one request to the root endpoint.
    pub fn record_request(&self) {
        self.requests_total.inc();
    }

    pub fn requests_total(&self) -> u64 {
        self.requests_total.get()
    }

    /// Encode every registered metric in the text exposition format.
    pub fn render(&self) -> String {
        let mut buffer = String::new();
        if let Err(err) = encode(&mut buffer, &self.registry) {
            tracing::error!("Failed to encode metrics: {}", err);
        }
        buffer
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
