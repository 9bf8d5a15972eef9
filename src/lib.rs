//! HTTP to Unix socket gateway.
//!
//! Every configured HTTP route is bound to a fixed command. A request on the
//! route opens a fresh connection to the backend's Unix socket, writes the
//! command, reads a bounded response and returns it as the HTTP body.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ net (listener, TLS) ──▶ http (router, request id)
//!                                          │
//!                                          ▼
//!                               RelayHandler (per route)
//!                                          │
//!                                          ▼
//!                               relay ──▶ Unix socket ──▶ Backend
//!
//!   Cross-cutting: config, lifecycle (state, signals), observability
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod relay;
pub mod routing;

pub use config::GatewayConfig;
pub use http::{HttpServer, ServerError};
pub use relay::RelayError;
