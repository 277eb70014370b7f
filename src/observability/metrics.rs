//! Metrics collection and exposition.
//!
//! # Metrics
//! - `ab_requests_total` (counter): requests by kind (homepage, passthrough, fallback, api) and status
//! - `ab_request_duration_seconds` (histogram): latency by kind
//! - `ab_assignments_total` (counter): assignments by variant and source
//! - `ab_document_fetch_failures_total` (counter): failed document fetches by variant and reason

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::variant::{Assignment, Variant};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a finished request.
pub fn record_request(kind: &'static str, status: u16, start: Instant) {
    let status = status.to_string();
    metrics::counter!("ab_requests_total", "kind" => kind, "status" => status).increment(1);
    metrics::histogram!("ab_request_duration_seconds", "kind" => kind)
        .record(start.elapsed().as_secs_f64());
}

/// Record a variant assignment.
pub fn record_assignment(assignment: &Assignment) {
    metrics::counter!(
        "ab_assignments_total",
        "variant" => assignment.variant.as_str(),
        "source" => assignment.source.as_str()
    )
    .increment(1);
}

/// Record a document fetch that fell back to the origin default.
pub fn record_fetch_failure(variant: Variant, reason: &'static str) {
    metrics::counter!(
        "ab_document_fetch_failures_total",
        "variant" => variant.as_str(),
        "reason" => reason
    )
    .increment(1);
}
