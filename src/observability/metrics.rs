//! Metrics collection and exposition.
//!
//! # Metrics
//! - `nav_resolutions_total` (counter): navigations by outcome and view
//! - `nav_http_requests_total` (counter): HTTP requests by endpoint and status
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Prometheus exporter only when `observability.metrics_enabled`

use std::net::SocketAddr;
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::routing::Navigation;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter")
        }
    }
}

/// Label pair describing a navigation outcome.
pub fn navigation_labels(navigation: &Navigation) -> (&'static str, &'static str) {
    match navigation {
        Navigation::Matched(m) => ("matched", m.view.as_str()),
        Navigation::Redirect { .. } => ("redirect", "none"),
        Navigation::NotFound(e) => (e.kind(), "none"),
    }
}

pub fn record_navigation(navigation: &Navigation) {
    let (outcome, view) = navigation_labels(navigation);
    metrics::counter!("nav_resolutions_total", "outcome" => outcome, "view" => view).increment(1);
}

pub fn record_request(endpoint: &'static str, status: u16) {
    metrics::counter!(
        "nav_http_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
}
