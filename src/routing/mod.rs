//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → table.rs (path → command, one entry per path)
//!     → Freeze as immutable RouteTable
//!     → http::handler builds one RelayHandler per entry
//!
//! Incoming Request (path)
//!     → axum router (exact path match)
//!     → RelayHandler for that path, or default 404
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Exact path matching only; no prefixes, no captures
//! - Health routes are fixed and cannot be shadowed

pub mod table;

pub use table::{RouteTable, HEALTHZ_PATH, STATUS_PATH};
