use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use http_to_sock::config::loader::read_config;
use http_to_sock::config::path_flag::format_path_mappings;
use http_to_sock::config::{
    parse_path_mapping, validate_config, ConfigError, GatewayConfig, RouteConfig, TlsConfig,
};
use http_to_sock::lifecycle::signals::shutdown_signal;
use http_to_sock::observability::{logging::init_logging, metrics::init_metrics};
use http_to_sock::HttpServer;

/// Expose Unix socket commands as HTTP routes.
#[derive(Parser, Debug)]
#[command(name = "http-to-sock", version, long_about = None)]
struct Cli {
    /// TOML config file. Flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Route mapping as path:command, e.g. "/_info:GET /_info". Repeatable.
    /// /_status and /healthz are built in and cannot be remapped.
    #[arg(long = "path", value_name = "PATH:COMMAND", value_parser = parse_path_mapping)]
    paths: Vec<RouteConfig>,

    /// Enable TLS.
    #[arg(long)]
    tls: bool,

    /// TLS certificate [default: ./cert.pem]
    #[arg(long)]
    cert: Option<PathBuf>,

    /// TLS private key [default: ./cert.key]
    #[arg(long)]
    key: Option<PathBuf>,

    /// IP address to listen on [default: 0.0.0.0]
    #[arg(short = 'l', long = "listen")]
    listen: Option<String>,

    /// TCP port for the HTTP(S) server [default: 8080]
    #[arg(short = 'p', long = "port")]
    port: Option<u16>,

    /// Seconds to wait for the socket's answer [default: 3]
    #[arg(long = "socket-timeout", value_name = "SECONDS")]
    socket_timeout: Option<u64>,

    /// Location of the socket file [default: /var/run/httpToSock.sock]
    #[arg(short = 'f', long = "socket-file")]
    socket_file: Option<PathBuf>,
}

impl Cli {
    /// Merge the optional config file with flag overrides and validate.
    fn into_config(self) -> Result<GatewayConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => GatewayConfig::default(),
        };
        self.apply(&mut config);
        validate_config(&config)?;
        Ok(config)
    }

    fn apply(self, config: &mut GatewayConfig) {
        if self.listen.is_some() || self.port.is_some() {
            config.listener.bind_address = override_bind_address(
                &config.listener.bind_address,
                self.listen.as_deref(),
                self.port,
            );
        }

        if self.tls && config.listener.tls.is_none() {
            config.listener.tls = Some(TlsConfig::default());
        }
        if let Some(tls) = config.listener.tls.as_mut() {
            if let Some(cert) = self.cert {
                tls.cert_path = cert;
            }
            if let Some(key) = self.key {
                tls.key_path = key;
            }
        }

        if let Some(secs) = self.socket_timeout {
            config.socket.timeout_ms = secs.saturating_mul(1_000);
        }
        if let Some(path) = self.socket_file {
            config.socket.path = path;
        }

        config.routes.extend(self.paths);
    }
}

/// Replace the host and/or port of `current` ("host:port").
fn override_bind_address(current: &str, host: Option<&str>, port: Option<u16>) -> String {
    let (current_host, current_port) = current.rsplit_once(':').unwrap_or((current, "8080"));

    let host = match host {
        Some(h) if h.contains(':') && !h.starts_with('[') => format!("[{h}]"),
        Some(h) => h.to_string(),
        None => current_host.to_string(),
    };
    let port = port.map_or_else(|| current_port.to_string(), |p| p.to_string());

    format!("{host}:{port}")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    init_logging(&config.observability)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "http-to-sock starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        tls = config.listener.tls.is_some(),
        socket = %config.socket.path.display(),
        socket_timeout_ms = config.socket.timeout_ms,
        routes = %format_path_mappings(&config.routes),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        init_metrics(addr)?;
    }

    let deadline = config.shutdown.deadline();
    let server = Arc::new(HttpServer::new(config));

    let mut serving = tokio::spawn({
        let server = server.clone();
        async move { server.start().await }
    });

    tokio::select! {
        signal = shutdown_signal() => {
            signal?;
            server.stop(deadline).await?;
            serving.await??;
        }
        result = &mut serving => {
            result??;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
