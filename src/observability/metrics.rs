//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_relay_requests_total` (counter): relays by route and outcome
//! - `gateway_relay_duration_seconds` (histogram): relay latency by route
//! - `gateway_relays_in_flight` (gauge): relays currently executing
//!
//! Recording is a no-op until a recorder is installed, so tests and
//! metrics-disabled deployments pay nothing.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished relay.
pub fn record_relay(route: &str, outcome: &'static str, start: Instant) {
    let route = route.to_string();
    metrics::counter!(
        "gateway_relay_requests_total",
        "route" => route.clone(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("gateway_relay_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Publish the current number of in-flight relays.
pub fn set_in_flight(count: u64) {
    metrics::gauge!("gateway_relays_in_flight").set(count as f64);
}
