//! Prometheus export of HTTP and lifecycle metrics.

mod prometheus_metrics;

pub use prometheus_metrics::PrometheusMetrics;
