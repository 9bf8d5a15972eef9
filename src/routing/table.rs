//! Immutable path → command table.
//!
//! # Responsibilities
//! - Hold one command per HTTP path
//! - Refuse paths the HTTP router cannot register verbatim
//! - Keep the fixed health routes out of user space

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::RouteConfig;

/// Liveness route answered with a JSON status document.
pub const STATUS_PATH: &str = "/_status";

/// Liveness route answered with a plain `ok`.
pub const HEALTHZ_PATH: &str = "/healthz";

/// Returns true for paths owned by the built-in health handlers.
pub fn is_reserved(path: &str) -> bool {
    path == STATUS_PATH || path == HEALTHZ_PATH
}

/// Describe why `path` cannot be registered as an exact route, if it can't.
pub fn route_path_problem(path: &str) -> Option<&'static str> {
    if !path.starts_with('/') {
        return Some("path must start with '/'");
    }
    if path.contains('{') || path.contains('}') {
        return Some("path must not contain '{' or '}'");
    }
    if path
        .split('/')
        .any(|segment| segment.starts_with(':') || segment.starts_with('*'))
    {
        return Some("path segments must not start with ':' or '*'");
    }
    None
}

/// Path → command mapping, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: BTreeMap<String, Arc<str>>,
}

impl RouteTable {
    /// Build the table from configuration.
    ///
    /// Config validation rejects duplicates up front; for input that skipped
    /// it, the last entry for a path wins. Unregistrable paths are dropped.
    pub fn from_config(routes: &[RouteConfig]) -> Self {
        let mut table = BTreeMap::new();

        for route in routes {
            if is_reserved(&route.path) {
                tracing::error!(path = %route.path, "Route shadows a health route, skipping");
                continue;
            }
            if let Some(reason) = route_path_problem(&route.path) {
                tracing::error!(path = %route.path, reason, "Route cannot be registered, skipping");
                continue;
            }

            let previous = table.insert(route.path.clone(), Arc::<str>::from(route.command.as_str()));
            if let Some(previous) = previous {
                tracing::warn!(
                    path = %route.path,
                    previous = %previous,
                    command = %route.command,
                    "Duplicate route, last definition wins"
                );
            }
        }

        Self { routes: table }
    }

    /// Look up the command bound to `path`.
    pub fn command(&self, path: &str) -> Option<&str> {
        self.routes.get(path).map(|c| c.as_ref())
    }

    /// Iterate routes in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<str>)> {
        self.routes.iter().map(|(path, command)| (path.as_str(), command))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_one_entry_per_path() {
        let table = RouteTable::from_config(&[
            RouteConfig::new("/info", "GET /info"),
            RouteConfig::new("/stats", "GET /info"),
        ]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.command("/info"), Some("GET /info"));
        assert_eq!(table.command("/stats"), Some("GET /info"));
        assert_eq!(table.command("/missing"), None);
    }

    #[test]
    fn last_duplicate_wins() {
        let table = RouteTable::from_config(&[
            RouteConfig::new("/info", "first"),
            RouteConfig::new("/info", "second"),
        ]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.command("/info"), Some("second"));
    }

    #[test]
    fn skips_reserved_and_invalid_paths() {
        let table = RouteTable::from_config(&[
            RouteConfig::new(STATUS_PATH, "x"),
            RouteConfig::new(HEALTHZ_PATH, "x"),
            RouteConfig::new("relative", "x"),
            RouteConfig::new("/a/{id}", "x"),
            RouteConfig::new("/a/:id", "x"),
            RouteConfig::new("/a/*rest", "x"),
            RouteConfig::new("/ok", "x"),
        ]);

        assert_eq!(table.iter().map(|(p, _)| p).collect::<Vec<_>>(), vec!["/ok"]);
    }

    #[test]
    fn path_problems() {
        assert_eq!(route_path_problem("/"), None);
        assert_eq!(route_path_problem("/a/b-c_d.json"), None);
        assert!(route_path_problem("").is_some());
        assert!(route_path_problem("a").is_some());
        assert!(route_path_problem("/{x}").is_some());
    }
}
