//! Single-shot request/response exchange over a Unix domain socket.
//!
//! # Responsibilities
//! - Dial the backend socket (fail fast when it is unreachable)
//! - Write the command verbatim, no framing
//! - Read until end-of-stream, capped at `MAX_RESPONSE_BYTES`; a reset after
//!   data has arrived counts as end-of-stream
//! - Race the exchange against a caller-supplied cancellation future
//!
//! # Design Decisions
//! - The exchange is a plain future inside `select!`; when the deadline wins
//!   it is dropped along with the socket, so nothing outlives the call
//! - Holding `MAX_RESPONSE_BYTES` bytes is reported as saturation even if the
//!   backend would have closed right after; a response of exactly that size is
//!   indistinguishable from a truncated one

use std::future::Future;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use axum::body::Bytes;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;

use super::error::RelayError;

/// Upper bound on a backend response. Anything this large is treated as truncated.
pub const MAX_RESPONSE_BYTES: usize = 5120;

/// Send `command` to the socket at `socket_path` and return the response,
/// giving up after `timeout`.
pub async fn request(
    socket_path: &Path,
    command: &str,
    timeout: Duration,
) -> Result<Bytes, RelayError> {
    request_until(socket_path, command, tokio::time::sleep(timeout)).await
}

/// Send `command` to the socket at `socket_path` and return the response,
/// giving up with [`RelayError::Timeout`] as soon as `cancel` completes.
///
/// The connection is opened and closed within this call on every path.
pub async fn request_until<F>(
    socket_path: &Path,
    command: &str,
    cancel: F,
) -> Result<Bytes, RelayError>
where
    F: Future<Output = ()>,
{
    let mut stream = UnixStream::connect(socket_path)
        .await
        .map_err(|source| RelayError::Connect {
            path: socket_path.to_path_buf(),
            source,
        })?;

    tracing::trace!(
        socket = %socket_path.display(),
        command_bytes = command.len(),
        "Socket connected"
    );

    tokio::select! {
        _ = cancel => Err(RelayError::Timeout),
        result = exchange(&mut stream, command.as_bytes()) => result,
    }
}

async fn exchange(stream: &mut UnixStream, command: &[u8]) -> Result<Bytes, RelayError> {
    // A backend may answer and close before taking the whole command. Its
    // reply is still queued on our side, so read it before giving up.
    let write_error = match stream.write_all(command).await {
        Ok(()) => None,
        Err(e) if is_peer_closed(&e) => Some(e),
        Err(e) => return Err(RelayError::Write(e)),
    };

    let mut buf = vec![0u8; MAX_RESPONSE_BYTES];
    let mut filled = 0;
    loop {
        match stream.read(&mut buf[filled..]).await {
            Ok(0) => break,
            Ok(n) => {
                filled += n;
                if filled >= MAX_RESPONSE_BYTES {
                    return Err(RelayError::BufferSaturation);
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            // Linux reports ECONNRESET after the queued bytes when the peer
            // closed with our command still unread.
            Err(e) if filled > 0 && is_peer_closed(&e) => break,
            Err(e) => {
                return Err(match write_error {
                    Some(write_error) => RelayError::Write(write_error),
                    None => RelayError::Read(e),
                })
            }
        }
    }

    if filled == 0 {
        if let Some(e) = write_error {
            return Err(RelayError::Write(e));
        }
    }

    buf.truncate(filled);
    Ok(Bytes::from(buf))
}

fn is_peer_closed(error: &std::io::Error) -> bool {
    matches!(
        error.kind(),
        ErrorKind::ConnectionReset | ErrorKind::BrokenPipe
    )
}
