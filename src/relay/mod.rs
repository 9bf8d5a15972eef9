//! Unix socket relay subsystem.
//!
//! # Data Flow
//! ```text
//! Relay handler (one per HTTP request)
//!     → client.rs (dial socket, write command, bounded read)
//!     → race against the per-request deadline
//!     → Bytes or RelayError (error.rs)
//! ```
//!
//! # Design Decisions
//! - One connection per call, never pooled or reused
//! - Responses are capped at `MAX_RESPONSE_BYTES`; a full buffer is an error
//! - The backend signals message completion by closing its end
//! - Timed-out reads are dropped with their socket, not left running

pub mod client;
pub mod error;

pub use client::{request, request_until, MAX_RESPONSE_BYTES};
pub use error::RelayError;
