//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Builder dispatch (attempts, latency)
//! - Connection codes (issued, dispensed)
//! - Review ingestion and proof-of-work increments

use once_cell::sync::Lazy;
use prometheus::core::Collector;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Builder Dispatch
// =============================================================================

/// Dispatch attempts by result.
pub static DISPATCH_ATTEMPTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "bountydesk_dispatch_attempts_total",
            "Total ticket dispatches to the builder service",
        ),
        &["result"], // "awaiting_review", "rejected", "timeout", "transport", ...
    )
    .unwrap()
});

/// Builder round-trip duration in seconds.
pub static DISPATCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "bountydesk_dispatch_duration_seconds",
            "Duration of builder service requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["result"],
    )
    .unwrap()
});

// =============================================================================
// Connection Codes
// =============================================================================

/// Connection codes issued total.
pub static CONNECTION_CODES_ISSUED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "bountydesk_connection_codes_issued_total",
        "Total connection codes issued",
    )
    .unwrap()
});

/// Dispense calls by result.
pub static CONNECTION_CODES_DISPENSED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "bountydesk_connection_code_dispenses_total",
            "Connection code dispense calls",
        ),
        &["result"], // "dispensed", "exhausted"
    )
    .unwrap()
});

// =============================================================================
// Tickets and Bounties
// =============================================================================

/// Review callbacks by result.
pub static REVIEWS_INGESTED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "bountydesk_reviews_ingested_total",
            "Review callbacks received from the builder service",
        ),
        &["result"], // "applied", "invalid", "not_found", "error"
    )
    .unwrap()
});

/// Proof-of-work increments by result.
pub static PROOF_INCREMENTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "bountydesk_proof_increments_total",
            "Proof-of-work counter increments",
        ),
        &["result"], // "applied", "not_found"
    )
    .unwrap()
});

/// All core metrics, for registration by the server.
pub fn all_metrics() -> Vec<Box<dyn Collector>> {
    vec![
        Box::new(DISPATCH_ATTEMPTS.clone()),
        Box::new(DISPATCH_DURATION.clone()),
        Box::new(CONNECTION_CODES_ISSUED.clone()),
        Box::new(CONNECTION_CODES_DISPENSED.clone()),
        Box::new(REVIEWS_INGESTED.clone()),
        Box::new(PROOF_INCREMENTS.clone()),
    ]
}
