//! Parsing of `--path` mappings.
//!
//! Each mapping has the form `path:command`, e.g. `/_status:GET /_status`.
//! The command is sent to the socket verbatim, so it cannot itself contain `:`.

use thiserror::Error;

use crate::config::schema::RouteConfig;

/// Errors from splitting a `path:command` mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathFlagError {
    #[error("path mapping {path} has broken down into more than 2 parts: {rest}")]
    TooManyParts { path: String, rest: String },

    #[error("path mapping {0:?} has no command; expected path:command")]
    MissingCommand(String),
}

/// Split a single `path:command` mapping into a route.
///
/// Usable directly as a clap `value_parser`.
pub fn parse_path_mapping(value: &str) -> Result<RouteConfig, PathFlagError> {
    let parts: Vec<&str> = value.split(':').collect();
    match parts.as_slice() {
        [path, command] => Ok(RouteConfig::new(*path, *command)),
        [_] => Err(PathFlagError::MissingCommand(value.to_string())),
        [path, rest @ ..] => Err(PathFlagError::TooManyParts {
            path: path.to_string(),
            rest: rest.join(" - "),
        }),
        [] => Err(PathFlagError::MissingCommand(value.to_string())),
    }
}

/// Render routes back into their flag form, comma separated.
pub fn format_path_mappings(routes: &[RouteConfig]) -> String {
    routes
        .iter()
        .map(|r| format!("{}:{}", r.path, r.command))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_single_mapping() {
        assert_eq!(
            parse_path_mapping("/_status:GET /_status").unwrap(),
            RouteConfig::new("/_status", "GET /_status")
        );
    }

    #[test]
    fn splits_several_mappings() {
        let routes: Vec<RouteConfig> = ["/_status:GET /_status", "/_test1:GET /_test1", "/_test2:GET /_test2"]
            .into_iter()
            .map(|v| parse_path_mapping(v).unwrap())
            .collect();

        assert_eq!(routes[1], RouteConfig::new("/_test1", "GET /_test1"));
        assert_eq!(routes[2], RouteConfig::new("/_test2", "GET /_test2"));
    }

    #[test]
    fn rejects_extra_delimiters() {
        let err = parse_path_mapping("/_status:GET:/_status").unwrap_err();
        assert_eq!(
            err,
            PathFlagError::TooManyParts {
                path: "/_status".into(),
                rest: "GET - /_status".into(),
            }
        );
    }

    #[test]
    fn rejects_missing_command() {
        assert!(matches!(
            parse_path_mapping("/lonely"),
            Err(PathFlagError::MissingCommand(_))
        ));
    }

    #[test]
    fn empty_command_is_allowed() {
        assert_eq!(parse_path_mapping("/x:").unwrap().command, "");
    }

    #[test]
    fn formats_back_to_flag_syntax() {
        let routes = vec![
            RouteConfig::new("/_status", "GET /_status"),
            RouteConfig::new("/_test1", "GET /_test1"),
        ];
        assert_eq!(
            format_path_mappings(&routes),
            "/_status:GET /_status,/_test1:GET /_test1"
        );
    }
}
