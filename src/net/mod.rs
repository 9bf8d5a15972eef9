//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! HttpServer::start
//!     → tls.rs (load certificate and key, when TLS is on)
//!     → listener.rs (bind TCP listener)
//!     → axum-server accept loop (plain or rustls acceptor)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - TLS material is loaded at start, never at construction
//! - Binding happens before serving so bind errors are reported distinctly
//! - TLS is optional and handled transparently by the acceptor

pub mod listener;
pub mod tls;
