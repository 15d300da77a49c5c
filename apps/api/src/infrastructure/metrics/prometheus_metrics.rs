//! Prometheus adapter for request and lifecycle metrics.
//!
//! Metrics are registered with a provided registry and exposed in the text
//! exposition format on `GET /metrics`.

use std::time::Duration;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

const RESPONSE_TIME_BUCKETS: &[f64] = &[0.01, 0.03, 0.05, 0.1, 0.25, 0.5];

/// Prometheus-backed metrics recorder.
///
/// # Metric Specification
///
/// - `http_requests_total{method, path, status}`: counter of served requests
/// - `http_response_time_seconds{method, path}`: histogram of handling time
/// - `pvz_created_total`: counter of registered PVZs
/// - `order_receptions_created_total`: counter of opened receptions
/// - `products_added_total`: counter of products added to receptions
///
/// `path` is the matched route template (`/pvz/:pvz_id/...`), never the raw
/// URI, so label cardinality stays bounded.
#[derive(Clone)]
pub struct PrometheusMetrics {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_response_time: HistogramVec,
    pvz_created: IntCounter,
    receptions_created: IntCounter,
    products_added: IntCounter,
}

impl PrometheusMetrics {
    /// Create and register metrics with the given registry.
    ///
    /// # Errors
    ///
    /// Returns an error if a metric cannot be registered (e.g., if a metric
    /// with the same name already exists in the registry).
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "path", "status"],
        )?;
        let http_response_time = HistogramVec::new(
            HistogramOpts::new("http_response_time_seconds", "Duration of HTTP requests")
                .buckets(RESPONSE_TIME_BUCKETS.to_vec()),
            &["method", "path"],
        )?;
        let pvz_created = IntCounter::new("pvz_created_total", "Total number of PVZ created")?;
        let receptions_created = IntCounter::new(
            "order_receptions_created_total",
            "Total number of order receptions created",
        )?;
        let products_added =
            IntCounter::new("products_added_total", "Total number of products added")?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_response_time.clone()))?;
        registry.register(Box::new(pvz_created.clone()))?;
        registry.register(Box::new(receptions_created.clone()))?;
        registry.register(Box::new(products_added.clone()))?;

        Ok(Self {
            registry: registry.clone(),
            http_requests_total,
            http_response_time,
            pvz_created,
            receptions_created,
            products_added,
        })
    }

    /// Record one served request.
    pub fn record_request(&self, method: &str, path: &str, status: u16, elapsed: Duration) {
        let status = status.to_string();
        self.http_requests_total
            .with_label_values(&[method, path, status.as_str()])
            .inc();
        self.http_response_time
            .with_label_values(&[method, path])
            .observe(elapsed.as_secs_f64());
    }

    pub fn pvz_created(&self) {
        self.pvz_created.inc();
    }

    pub fn reception_created(&self) {
        self.receptions_created.inc();
    }

    pub fn product_added(&self) {
        self.products_added.inc();
    }

    /// Render every registered metric in the text exposition format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl std::fmt::Debug for PrometheusMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrometheusMetrics").finish_non_exhaustive()
    }
}
