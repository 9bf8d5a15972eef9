//! TCP listener binding.
//!
//! # Responsibilities
//! - Bind to the configured address (host names allowed)
//! - Hand a non-blocking std listener to axum-server

use std::net::{SocketAddr, TcpListener};

use thiserror::Error;

/// Error type for listener operations.
#[derive(Debug, Error)]
#[error("failed to bind {address}: {source}")]
pub struct BindError {
    pub address: String,
    #[source]
    pub source: std::io::Error,
}

/// Bind the listening socket for `address`.
pub fn bind(address: &str) -> Result<(TcpListener, SocketAddr), BindError> {
    let wrap = |source: std::io::Error| BindError {
        address: address.to_string(),
        source,
    };

    let listener = TcpListener::bind(address).map_err(wrap)?;
    listener.set_nonblocking(true).map_err(wrap)?;
    let local_addr = listener.local_addr().map_err(wrap)?;

    tracing::info!(address = %local_addr, "Listener bound");
    Ok((listener, local_addr))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binds_ephemeral_port() {
        let (_listener, addr) = bind("127.0.0.1:0").unwrap();
        assert!(addr.ip().is_loopback());
        assert_ne!(addr.port(), 0);
    }

    #[test]
    fn address_in_use_is_bind_error() {
        let (_first, addr) = bind("127.0.0.1:0").unwrap();
        let err = bind(&addr.to_string()).unwrap_err();
        assert_eq!(err.address, addr.to_string());
    }

    #[test]
    fn unparseable_address_is_bind_error() {
        assert!(bind("not an address").is_err());
    }
}
