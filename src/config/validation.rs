//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, non-empty paths)
//! - Detect duplicate and reserved routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::{GatewayConfig, ObservabilityConfig};
use crate::routing::table::{is_reserved, route_path_problem};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener bind address is empty")]
    EmptyBindAddress,

    #[error("TLS {0} path is empty")]
    EmptyTlsPath(&'static str),

    #[error("socket path is empty")]
    EmptySocketPath,

    #[error("socket timeout must be greater than zero")]
    ZeroSocketTimeout,

    #[error("route {path:?} is invalid: {reason}")]
    InvalidRoutePath { path: String, reason: &'static str },

    #[error("route {0:?} collides with a built-in health route")]
    ReservedRoute(String),

    #[error("route {0:?} is defined more than once")]
    DuplicateRoute(String),

    #[error("metrics address {0:?} is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Check a configuration for semantic problems.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.trim().is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    }
    if let Some(tls) = &config.listener.tls {
        if tls.cert_path.as_os_str().is_empty() {
            errors.push(ValidationError::EmptyTlsPath("certificate"));
        }
        if tls.key_path.as_os_str().is_empty() {
            errors.push(ValidationError::EmptyTlsPath("key"));
        }
    }

    if config.socket.path.as_os_str().is_empty() {
        errors.push(ValidationError::EmptySocketPath);
    }
    if config.socket.timeout_ms == 0 {
        errors.push(ValidationError::ZeroSocketTimeout);
    }

    let mut seen = HashSet::new();
    for route in &config.routes {
        if is_reserved(&route.path) {
            errors.push(ValidationError::ReservedRoute(route.path.clone()));
        } else if let Some(reason) = route_path_problem(&route.path) {
            errors.push(ValidationError::InvalidRoutePath {
                path: route.path.clone(),
                reason,
            });
        }
        if !seen.insert(route.path.as_str()) {
            errors.push(ValidationError::DuplicateRoute(route.path.clone()));
        }
    }

    validate_observability(&config.observability, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_observability(config: &ObservabilityConfig, errors: &mut Vec<ValidationError>) {
    if config.metrics_enabled
        && config
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.metrics_address.clone(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{RouteConfig, TlsConfig};
    use std::path::PathBuf;

    fn config_with_routes(routes: &[(&str, &str)]) -> GatewayConfig {
        GatewayConfig {
            routes: routes
                .iter()
                .map(|(p, c)| RouteConfig::new(*p, *c))
                .collect(),
            ..GatewayConfig::default()
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&GatewayConfig::default()), Ok(()));
    }

    #[test]
    fn routes_sharing_a_command_are_fine() {
        let config = config_with_routes(&[("/a", "GET /info"), ("/b", "GET /info")]);
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn duplicate_paths_are_rejected() {
        let config = config_with_routes(&[("/a", "one"), ("/a", "two")]);
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::DuplicateRoute("/a".into())])
        );
    }

    #[test]
    fn health_paths_are_reserved() {
        let config = config_with_routes(&[("/healthz", "x"), ("/_status", "y")]);
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::ReservedRoute("/healthz".into()),
                ValidationError::ReservedRoute("/_status".into()),
            ]
        );
    }

    #[test]
    fn unroutable_paths_are_rejected() {
        let config = config_with_routes(&[("info", "x"), ("/users/{id}", "y"), ("", "z")]);
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3, "{errors:?}");
        assert!(errors
            .iter()
            .all(|e| matches!(e, ValidationError::InvalidRoutePath { .. })));
    }

    #[test]
    fn collects_every_problem() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = " ".into();
        config.listener.tls = Some(TlsConfig {
            cert_path: PathBuf::new(),
            key_path: PathBuf::new(),
        });
        config.socket.path = PathBuf::new();
        config.socket.timeout_ms = 0;
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "not-an-address".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyBindAddress,
                ValidationError::EmptyTlsPath("certificate"),
                ValidationError::EmptyTlsPath("key"),
                ValidationError::EmptySocketPath,
                ValidationError::ZeroSocketTimeout,
                ValidationError::InvalidMetricsAddress("not-an-address".into()),
            ]
        );
    }
}
