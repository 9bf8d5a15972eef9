//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! State (state.rs):
//!     Created → Running → Stopping → Stopped
//!
//! In-flight tracking (inflight.rs):
//!     Relay handler entered → guard held → guard dropped on return
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → main calls HttpServer::stop(deadline)
//! ```
//!
//! # Design Decisions
//! - Transitions are one-directional; a stopped server is never restarted
//! - Shutdown has a deadline: forced close after it expires
//! - Shutdown waits for in-flight relays, it never cancels them

pub mod inflight;
pub mod signals;
pub mod state;

pub use inflight::{InFlight, InFlightGuard};
pub use state::{Lifecycle, ServerState};
