//! Built-in liveness routes.
//!
//! `/healthz` answers a plain `ok`; `/_status` reports version, lifecycle
//! state, route count and in-flight relays as JSON. Neither touches the
//! backend socket.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::lifecycle::{InFlight, Lifecycle};

/// State shared by the health routes.
#[derive(Debug, Clone)]
pub struct HealthState {
    lifecycle: Arc<Lifecycle>,
    in_flight: InFlight,
    routes: usize,
}

impl HealthState {
    pub fn new(lifecycle: Arc<Lifecycle>, in_flight: InFlight, routes: usize) -> Self {
        Self {
            lifecycle,
            in_flight,
            routes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub status: &'static str,
    pub version: &'static str,
    pub state: &'static str,
    pub routes: usize,
    pub in_flight: u64,
}

pub async fn status(State(state): State<HealthState>) -> Json<StatusReport> {
    Json(StatusReport {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        state: state.lifecycle.current().as_str(),
        routes: state.routes,
        in_flight: state.in_flight.active_count(),
    })
}

pub async fn healthz() -> &'static str {
    "ok"
}
