//! Server lifecycle state machine.

use tokio::sync::watch;

/// Lifecycle state of one server instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// Configuration stored, listener not opened yet.
    Created,
    /// Listener accepting, routes registered.
    Running,
    /// Listener closed, in-flight requests draining.
    Stopping,
    /// Terminal.
    Stopped,
}

impl ServerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerState::Created => "created",
            ServerState::Running => "running",
            ServerState::Stopping => "stopping",
            ServerState::Stopped => "stopped",
        }
    }
}

impl std::fmt::Display for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared holder of a [`ServerState`] that can be awaited.
///
/// Backed by a watch channel so `stop` can wait for the serving task to
/// reach `Stopped` without polling.
#[derive(Debug)]
pub struct Lifecycle {
    tx: watch::Sender<ServerState>,
}

impl Lifecycle {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ServerState::Created);
        Self { tx }
    }

    /// Current state.
    pub fn current(&self) -> ServerState {
        *self.tx.borrow()
    }

    /// Move from `from` to `to`. Returns false, changing nothing, if the
    /// current state is not `from`.
    pub fn transition(&self, from: ServerState, to: ServerState) -> bool {
        let moved = self.tx.send_if_modified(|state| {
            if *state == from {
                *state = to;
                true
            } else {
                false
            }
        });
        if moved {
            tracing::debug!(from = %from, to = %to, "Server state changed");
        }
        moved
    }

    /// Enter `Stopped` from any state.
    pub fn finish(&self) {
        let from = self.tx.send_replace(ServerState::Stopped);
        if from != ServerState::Stopped {
            tracing::debug!(from = %from, to = %ServerState::Stopped, "Server state changed");
        }
    }

    /// Resolve once the state is `Stopped`.
    pub async fn stopped(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = rx.wait_for(|state| *state == ServerState::Stopped).await;
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
