//! OS signal handling.
//!
//! SIGINT and SIGTERM both request a graceful stop. The caller decides what
//! to do with it; this module only waits.

use tokio::signal::unix::{signal, SignalKind};

/// Wait for SIGINT (Ctrl+C) or SIGTERM.
///
/// Fails only if the signal handlers cannot be installed.
pub async fn shutdown_signal() -> std::io::Result<()> {
    let mut terminate = signal(SignalKind::terminate())?;

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            tracing::info!(signal = "SIGINT", "Shutdown signal received");
        }
        _ = terminate.recv() => {
            tracing::info!(signal = "SIGTERM", "Shutdown signal received");
        }
    }

    Ok(())
}
