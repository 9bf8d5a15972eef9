//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use http_to_sock::config::{GatewayConfig, RouteConfig};
use http_to_sock::{HttpServer, ServerError};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::task::JoinHandle;

/// Read whatever the gateway sent in one go.
pub async fn read_command(stream: &mut UnixStream) -> Vec<u8> {
    let mut buf = vec![0u8; 5120];
    let n = stream.read(&mut buf).await.unwrap_or(0);
    buf.truncate(n);
    buf
}

/// Start a Unix socket backend in `dir` driven by `f` for each connection.
pub fn start_programmable_backend<F, Fut>(dir: &TempDir, f: F) -> PathBuf
where
    F: Fn(UnixStream) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let path = dir.path().join("backend.sock");
    let listener = UnixListener::bind(&path).unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let f = f.clone();
            tokio::spawn(async move { f(stream).await });
        }
    });

    path
}

/// Start a backend that writes back whatever it receives, then closes.
#[allow(dead_code)]
pub fn start_echo_backend(dir: &TempDir) -> PathBuf {
    start_programmable_backend(dir, |mut stream| async move {
        let command = read_command(&mut stream).await;
        let _ = stream.write_all(&command).await;
    })
}

/// Gateway config on an ephemeral loopback port.
pub fn gateway_config(socket: PathBuf, routes: &[(&str, &str)]) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.socket.path = socket;
    config.routes = routes
        .iter()
        .map(|(path, command)| RouteConfig::new(*path, *command))
        .collect();
    config
}

pub struct RunningGateway {
    pub server: Arc<HttpServer>,
    pub addr: SocketAddr,
    pub serving: JoinHandle<Result<(), ServerError>>,
}

impl RunningGateway {
    #[allow(dead_code)]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start the gateway in the background and wait until it is listening.
pub async fn start_gateway(config: GatewayConfig) -> RunningGateway {
    let server = Arc::new(HttpServer::new(config));
    let serving = tokio::spawn({
        let server = server.clone();
        async move { server.start().await }
    });
    let addr = server
        .local_addr()
        .await
        .expect("gateway failed to start listening");

    RunningGateway {
        server,
        addr,
        serving,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
