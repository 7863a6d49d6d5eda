//! Request metrics middleware.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use once_cell::sync::Lazy;

/// Shared middleware handle; every worker wraps the same instance so the
/// counters aggregate across the whole server.
pub static METRICS: Lazy<PrometheusMetrics> = Lazy::new(|| {
    PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics") // scrape path
        .build()
        .expect("metrics builder")
});
