//! In-flight relay tracking.
//!
//! # Responsibilities
//! - Count relay calls currently executing
//! - Give each call a short id for log correlation
//! - Report how much work a shutdown is waiting on

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Global atomic counter for relay ids.
/// Relaxed ordering is enough: we only need uniqueness.
static RELAY_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for one relay call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelayId(u64);

impl RelayId {
    pub fn new() -> Self {
        Self(RELAY_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for RelayId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RelayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "relay-{}", self.0)
    }
}

/// Counter of relay calls in progress, shared by every handler.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    active: Arc<AtomicU64>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a relay call. The returned guard decrements on drop, including
    /// when the request future is dropped mid-call.
    pub fn track(&self) -> InFlightGuard {
        self.active.fetch_add(1, Ordering::SeqCst);
        InFlightGuard {
            active: Arc::clone(&self.active),
            id: RelayId::new(),
        }
    }

    /// Number of relay calls currently executing.
    pub fn active_count(&self) -> u64 {
        self.active.load(Ordering::SeqCst)
    }
}

/// Guard for one relay call.
#[derive(Debug)]
pub struct InFlightGuard {
    active: Arc<AtomicU64>,
    id: RelayId,
}

impl InFlightGuard {
    pub fn id(&self) -> RelayId {
        self.id
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
        tracing::trace!(relay_id = %self.id, "Relay finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_ids_are_unique() {
        assert_ne!(RelayId::new(), RelayId::new());
    }

    #[test]
    fn counts_guards() {
        let in_flight = InFlight::new();
        assert_eq!(in_flight.active_count(), 0);

        let first = in_flight.track();
        let second = in_flight.clone().track();
        assert_eq!(in_flight.active_count(), 2);
        assert_ne!(first.id(), second.id());

        drop(first);
        assert_eq!(in_flight.active_count(), 1);
        drop(second);
        assert_eq!(in_flight.active_count(), 0);
    }
}
