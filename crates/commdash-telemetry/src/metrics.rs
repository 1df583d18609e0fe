//! Prometheus metrics for the dashboard client.
//!
//! # Panics
//!
//! Metric registration uses `unwrap()`. Registration only fails on duplicate
//! metric names, which is a programming error surfaced on first use.

use crate::error::{TelemetryError, TelemetryResult};
use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_gauge, register_histogram_vec, register_int_counter,
    CounterVec, Encoder, Gauge, HistogramVec, IntCounter, TextEncoder,
};

/// Wrapped API requests.
/// Labels: outcome (success/http_error/transport_error/decode_error)
pub static API_REQUESTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "commdash_api_requests_total",
        "Total wrapped API requests by outcome",
        &["outcome"]
    )
    .unwrap()
});

/// Wrapped API request latency in milliseconds.
pub static API_LATENCY_MS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "commdash_api_latency_ms",
        "Wrapped API request latency in milliseconds",
        &["method"],
        vec![5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0, 10000.0]
    )
    .unwrap()
});

/// Backend reachability (1 = connected, 0 = disconnected).
pub static BACKEND_CONNECTED: Lazy<Gauge> = Lazy::new(|| {
    register_gauge!(
        "commdash_backend_connected",
        "Last known backend reachability (1=connected)"
    )
    .unwrap()
});

/// Health probes issued by the connection monitor.
pub static HEALTH_CHECKS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "commdash_health_checks_total",
        "Total health probes by result",
        &["result"]
    )
    .unwrap()
});

/// Notifications shown.
pub static NOTIFICATIONS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "commdash_notifications_total",
        "Total notifications shown by severity",
        &["severity"]
    )
    .unwrap()
});

/// Notifications dropped because the visible cap was reached.
pub static NOTIFICATIONS_DROPPED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "commdash_notifications_dropped_total",
        "Notifications evicted to honor the visible cap"
    )
    .unwrap()
});

/// Page refreshes.
/// Labels: page, outcome (ok/error/skipped)
pub static PAGE_REFRESH_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "commdash_page_refresh_total",
        "Total page refreshes by page and outcome",
        &["page", "outcome"]
    )
    .unwrap()
});

/// Rows written to CSV exports.
pub static EXPORTED_ROWS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("commdash_exported_rows_total", "Total rows exported to CSV").unwrap()
});

/// Errors caught by the global reporter.
/// Labels: kind (rejection/script)
pub static UNHANDLED_ERRORS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "commdash_unhandled_errors_total",
        "Total errors reported by the global error reporter",
        &["kind"]
    )
    .unwrap()
});

/// Metrics facade.
pub struct Metrics;

impl Metrics {
    /// Record a wrapped API request outcome and its latency.
    pub fn api_request(method: &str, outcome: &str, latency_ms: f64) {
        API_REQUESTS_TOTAL.with_label_values(&[outcome]).inc();
        API_LATENCY_MS
            .with_label_values(&[method])
            .observe(latency_ms);
    }

    /// Record backend reachability.
    pub fn backend_connected(connected: bool) {
        BACKEND_CONNECTED.set(if connected { 1.0 } else { 0.0 });
    }

    /// Record a health probe result.
    pub fn health_check(healthy: bool) {
        let result = if healthy { "healthy" } else { "unhealthy" };
        HEALTH_CHECKS_TOTAL.with_label_values(&[result]).inc();
    }

    pub fn notification(severity: &str) {
        NOTIFICATIONS_TOTAL.with_label_values(&[severity]).inc();
    }

    pub fn notification_dropped() {
        NOTIFICATIONS_DROPPED_TOTAL.inc();
    }

    pub fn page_refresh(page: &str, outcome: &str) {
        PAGE_REFRESH_TOTAL.with_label_values(&[page, outcome]).inc();
    }

    pub fn exported_rows(rows: usize) {
        EXPORTED_ROWS_TOTAL.inc_by(rows as u64);
    }

    pub fn unhandled_error(kind: &str) {
        UNHANDLED_ERRORS_TOTAL.with_label_values(&[kind]).inc();
    }

    /// Render every registered metric in the Prometheus text format.
    pub fn gather_text() -> TelemetryResult<String> {
        let families = prometheus::gather();
        let mut buf = Vec::new();
        TextEncoder::new()
            .encode(&families, &mut buf)
            .map_err(|e| TelemetryError::Metrics(e.to_string()))?;
        String::from_utf8(buf).map_err(|e| TelemetryError::Metrics(e.to_string()))
    }
}
