//! Relay error definitions.

use std::path::PathBuf;

use thiserror::Error;

use super::client::MAX_RESPONSE_BYTES;

/// Errors that can occur during a single socket exchange.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The backend socket could not be reached.
    #[error("failed to connect to socket {path:?}: {source}")]
    Connect {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The command could not be written to the socket.
    #[error("failed to write command to socket: {0}")]
    Write(#[source] std::io::Error),

    /// Reading the response failed.
    #[error("failed to read response from socket: {0}")]
    Read(#[source] std::io::Error),

    /// The cancellation signal fired before the backend answered.
    #[error("timed out waiting for response from socket")]
    Timeout,

    /// The response filled the read buffer and may have been truncated.
    #[error("buffer at maximum capacity of {} bytes, likely oversaturation", MAX_RESPONSE_BYTES)]
    BufferSaturation,

    /// The backend closed the connection without writing anything.
    #[error("no response from socket")]
    EmptyResponse,
}

impl RelayError {
    /// Stable label used for log fields and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Connect { .. } => "connect_error",
            RelayError::Write(_) => "write_error",
            RelayError::Read(_) => "read_error",
            RelayError::Timeout => "timeout",
            RelayError::BufferSaturation => "buffer_saturation",
            RelayError::EmptyResponse => "empty_response",
        }
    }
}
