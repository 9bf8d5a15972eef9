//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (axum-server, router, lifecycle)
//!     → request.rs (assign/propagate x-request-id, request span)
//!     → handler.rs (RelayHandler for the matched path)
//!         → relay::request (Unix socket round-trip)
//!     → 200 application/json | 500
//!
//! Fixed routes:
//!     → health.rs (/_status, /healthz)
//! ```

pub mod handler;
pub mod health;
pub mod request;
pub mod server;

pub use handler::{relay_handlers, RelayHandler, NO_RESPONSE_BODY};
pub use request::X_REQUEST_ID;
pub use server::{HttpServer, ServerError};
