//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → CLI overrides (main.rs, path_flag.rs for --path)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → moved into HttpServer
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod path_flag;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use path_flag::{parse_path_mapping, PathFlagError};
pub use schema::{
    GatewayConfig, ListenerConfig, LogFormat, ObservabilityConfig, RouteConfig, ShutdownConfig,
    SocketConfig, TlsConfig,
};
pub use validation::{validate_config, ValidationError};
