//! HTTP server setup and lifecycle.
//!
//! # Responsibilities
//! - Create the axum Router: one relay route per configured path plus the
//!   fixed health routes
//! - Wire up middleware (request id, tracing)
//! - Bind the listener, plaintext or TLS, and serve until stopped
//! - Graceful stop with a deadline
//!
//! # Lifecycle
//! ```text
//! new()   → Created
//! start() → Running ──────────────┐
//! stop()  → Stopping → (drained) → Stopped
//!                    → (deadline) → forced close, ShutdownTimeout
//! ```

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::routing::{any, get};
use axum::Router;
use axum_server::Handle;
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::http::handler::{relay_handlers, RelayHandler};
use crate::http::health::{self, HealthState};
use crate::http::request;
use crate::lifecycle::{InFlight, Lifecycle, ServerState};
use crate::net::listener::{self, BindError};
use crate::net::tls::{load_tls_config, TlsError};
use crate::routing::{RouteTable, HEALTHZ_PATH, STATUS_PATH};

/// Fatal server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// `start` was called on a server that already ran.
    #[error("server has already been started")]
    AlreadyStarted,

    #[error(transparent)]
    Tls(#[from] TlsError),

    #[error(transparent)]
    Bind(#[from] BindError),

    #[error("HTTP server failed: {0}")]
    Serve(#[source] std::io::Error),

    /// In-flight requests did not finish within the stop deadline.
    #[error("graceful shutdown did not complete within {0:?}")]
    ShutdownTimeout(Duration),
}

/// HTTP front end of the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
    handle: Handle,
    lifecycle: Arc<Lifecycle>,
    in_flight: InFlight,
}

impl HttpServer {
    /// Create a new server with the given configuration.
    ///
    /// Opens nothing; TLS material and the listener are loaded by `start`.
    pub fn new(config: GatewayConfig) -> Self {
        let lifecycle = Arc::new(Lifecycle::new());
        let in_flight = InFlight::new();

        let table = RouteTable::from_config(&config.routes);
        let handlers = relay_handlers(&table, &config.socket, &in_flight);
        let health_state = HealthState::new(lifecycle.clone(), in_flight.clone(), handlers.len());

        let router = Self::build_router(handlers, health_state);
        Self {
            router,
            config,
            handle: Handle::new(),
            lifecycle,
            in_flight,
        }
    }

    /// Build the axum router with all middleware layers.
    fn build_router(handlers: Vec<RelayHandler>, health_state: HealthState) -> Router {
        let mut router = Router::new()
            .route(STATUS_PATH, get(health::status))
            .route(HEALTHZ_PATH, get(health::healthz));

        for handler in handlers {
            let path = handler.route().to_string();
            tracing::debug!(path = %path, command = %handler.command(), "Route registered");
            router = router.route(
                &path,
                any(move |request: Request<Body>| async move { handler.handle(request).await }),
            );
        }

        router.with_state(health_state).layer(
            ServiceBuilder::new()
                .layer(request::set_request_id_layer())
                .layer(TraceLayer::new_for_http().make_span_with(request::make_span))
                .layer(request::propagate_request_id_layer()),
        )
    }

    /// Bind and serve until stopped.
    ///
    /// Resolves `Ok(())` after `stop`, or with the error that ended serving.
    /// The server is `Stopped` afterwards either way and cannot be restarted.
    pub async fn start(&self) -> Result<(), ServerError> {
        if !self
            .lifecycle
            .transition(ServerState::Created, ServerState::Running)
        {
            return Err(ServerError::AlreadyStarted);
        }

        let result = self.serve().await;
        self.lifecycle.finish();

        match &result {
            Ok(()) => tracing::info!("HTTP server stopped"),
            Err(e) => tracing::error!(error = %e, "HTTP server failed"),
        }
        result
    }

    async fn serve(&self) -> Result<(), ServerError> {
        let tls = match &self.config.listener.tls {
            Some(tls) => Some(load_tls_config(&tls.cert_path, &tls.key_path).await?),
            None => None,
        };

        let (listener, local_addr) = listener::bind(&self.config.listener.bind_address)?;

        tracing::info!(
            address = %local_addr,
            tls = tls.is_some(),
            socket = %self.config.socket.path.display(),
            socket_timeout_ms = self.config.socket.timeout_ms,
            "HTTP server starting"
        );

        let app = self.router.clone().into_make_service();
        let served = match tls {
            Some(tls) => {
                axum_server::from_tcp_rustls(listener, tls)
                    .handle(self.handle.clone())
                    .serve(app)
                    .await
            }
            None => {
                axum_server::from_tcp(listener)
                    .handle(self.handle.clone())
                    .serve(app)
                    .await
            }
        };

        served.map_err(ServerError::Serve)
    }

    /// Stop accepting connections and wait up to `deadline` for in-flight
    /// requests to finish.
    ///
    /// A no-op returning `Ok(())` unless the server is `Running`. When the
    /// deadline passes, remaining connections are closed and
    /// [`ServerError::ShutdownTimeout`] is returned.
    pub async fn stop(&self, deadline: Duration) -> Result<(), ServerError> {
        if !self
            .lifecycle
            .transition(ServerState::Running, ServerState::Stopping)
        {
            tracing::debug!(state = %self.lifecycle.current(), "Stop ignored, server not running");
            return Ok(());
        }

        tracing::info!(
            deadline_ms = deadline.as_millis() as u64,
            in_flight = self.in_flight.active_count(),
            "Stopping HTTP server"
        );
        self.handle.graceful_shutdown(None);

        match tokio::time::timeout(deadline, self.lifecycle.stopped()).await {
            Ok(()) => Ok(()),
            Err(_) => {
                tracing::warn!(
                    in_flight = self.in_flight.active_count(),
                    "Graceful shutdown deadline passed, closing remaining connections"
                );
                self.handle.shutdown();
                Err(ServerError::ShutdownTimeout(deadline))
            }
        }
    }

    /// Address the listener is bound to.
    ///
    /// Waits until `start` has bound; `None` if the server stopped without
    /// ever listening.
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        tokio::select! {
            biased;
            addr = self.handle.listening() => addr,
            _ = self.lifecycle.stopped() => None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ServerState {
        self.lifecycle.current()
    }

    /// Relays currently executing.
    pub fn in_flight(&self) -> u64 {
        self.in_flight.active_count()
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
