//! Per-route relay handlers.
//!
//! Each configured route gets one [`RelayHandler`] owning its command, the
//! shared socket path and the relay timeout. A request performs exactly one
//! relay; there are no retries at this layer.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::{Body, Bytes};
use axum::http::{header, Request, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::config::SocketConfig;
use crate::http::request::request_id;
use crate::lifecycle::InFlight;
use crate::observability::metrics;
use crate::relay::{self, RelayError};
use crate::routing::RouteTable;

/// Body returned when the backend closed without answering.
pub const NO_RESPONSE_BODY: &str = "no response from socket";

/// Handler bound to one `(route, command)` pair.
#[derive(Debug, Clone)]
pub struct RelayHandler {
    route: Arc<str>,
    command: Arc<str>,
    socket_path: Arc<PathBuf>,
    timeout: Duration,
    in_flight: InFlight,
}

impl RelayHandler {
    pub fn new(
        route: impl Into<Arc<str>>,
        command: impl Into<Arc<str>>,
        socket: &SocketConfig,
        in_flight: InFlight,
    ) -> Self {
        Self {
            route: route.into(),
            command: command.into(),
            socket_path: Arc::new(socket.path.clone()),
            timeout: socket.timeout(),
            in_flight,
        }
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Run one relay. An empty answer counts as [`RelayError::EmptyResponse`].
    pub async fn exchange(&self) -> Result<Bytes, RelayError> {
        let body = relay::request(&self.socket_path, &self.command, self.timeout).await?;
        if body.is_empty() {
            return Err(RelayError::EmptyResponse);
        }
        Ok(body)
    }

    /// Serve one HTTP request. The request body is ignored.
    pub async fn handle(&self, request: Request<Body>) -> Response {
        let request_id = request_id(&request).to_owned();
        drop(request);

        let guard = self.in_flight.track();
        metrics::set_in_flight(self.in_flight.active_count());
        let start = Instant::now();

        let result = self.exchange().await;

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        metrics::record_relay(&self.route, outcome, start);
        let relay_id = guard.id();
        drop(guard);
        metrics::set_in_flight(self.in_flight.active_count());

        match result {
            Ok(body) => {
                tracing::debug!(
                    request_id = %request_id,
                    relay_id = %relay_id,
                    route = %self.route,
                    bytes = body.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Relay succeeded"
                );
                ([(header::CONTENT_TYPE, "application/json")], body).into_response()
            }
            Err(RelayError::EmptyResponse) => {
                tracing::warn!(
                    request_id = %request_id,
                    relay_id = %relay_id,
                    route = %self.route,
                    "{}", NO_RESPONSE_BODY
                );
                (StatusCode::INTERNAL_SERVER_ERROR, NO_RESPONSE_BODY).into_response()
            }
            Err(e) => {
                tracing::error!(
                    request_id = %request_id,
                    relay_id = %relay_id,
                    route = %self.route,
                    socket = %self.socket_path.display(),
                    kind = e.kind(),
                    error = %e,
                    "Relay failed"
                );
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Build one handler per route in `table`.
pub fn relay_handlers(
    table: &RouteTable,
    socket: &SocketConfig,
    in_flight: &InFlight,
) -> Vec<RelayHandler> {
    table
        .iter()
        .map(|(path, command)| RelayHandler::new(path, command.clone(), socket, in_flight.clone()))
        .collect()
}
