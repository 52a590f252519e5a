//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the bountydesk server:
//! - HTTP request metrics (latency, counts, errors)
//! - Authentication failures
//! - Bounty status buckets and ticket counts (collected dynamically)

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, IntGaugeVec, Opts,
    Registry, TextEncoder,
};
use tracing::warn;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "bountydesk_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("bountydesk_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "bountydesk_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

/// Authentication failures.
pub static AUTH_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "bountydesk_auth_failures_total",
            "Total authentication failures",
        ),
        &["reason"],
    )
    .unwrap()
});

// =============================================================================
// Bounty Metrics (collected dynamically)
// =============================================================================

/// Visible bounties per status bucket. Buckets overlap.
pub static BOUNTIES_BY_STATUS: Lazy<IntGaugeVec> = Lazy::new(|| {
    IntGaugeVec::new(
        Opts::new(
            "bountydesk_bounties_by_status",
            "Visible bounty count per status bucket",
        ),
        &["status"],
    )
    .unwrap()
});

/// Unused connection codes left to dispense.
pub static CONNECTION_CODES_UNUSED: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "bountydesk_connection_codes_unused",
        "Connection codes not yet dispensed",
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();
    registry
        .register(Box::new(AUTH_FAILURES_TOTAL.clone()))
        .unwrap();

    // Bounties
    registry
        .register(Box::new(BOUNTIES_BY_STATUS.clone()))
        .unwrap();
    registry
        .register(Box::new(CONNECTION_CODES_UNUSED.clone()))
        .unwrap();

    // Core metrics (dispatch, connection codes, reviews, proof counter)
    for metric in bountydesk_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        warn!("Failed to encode metrics: {}", e);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Refresh gauges from current application state.
///
/// Called before encoding so a scrape sees the live status buckets.
pub fn collect_dynamic_metrics(state: &crate::state::AppState) {
    match state.bounty_store().status_counts() {
        Ok(counts) => {
            for (bucket, count) in counts.buckets() {
                BOUNTIES_BY_STATUS.with_label_values(&[bucket]).set(count);
            }
        }
        Err(e) => warn!("Failed to collect bounty status counts: {}", e),
    }

    match state.connection_code_store().count_unused() {
        Ok(unused) => CONNECTION_CODES_UNUSED.set(unused),
        Err(e) => warn!("Failed to count unused connection codes: {}", e),
    }
}

/// Normalize a path for metric labels (replace IDs with placeholders).
pub fn normalize_path(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            let is_id = uuid::Uuid::parse_str(segment).is_ok()
                || (!segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()));
            if is_id {
                "{id}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
