//! Pretend backend for trying the gateway locally.
//!
//! Listens on a Unix socket and answers every command with a small JSON
//! document that quotes it, then closes the connection.
//!
//! ```text
//! cargo run --example echo_backend -- /tmp/http-to-sock.sock
//! cargo run -- -p 8080 -f /tmp/http-to-sock.sock --path "/info:GET /info"
//! curl localhost:8080/info
//! ```

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/tmp/http-to-sock.sock".to_string());

    let _ = std::fs::remove_file(&path);
    let listener = UnixListener::bind(&path)?;
    println!("Pretend backend is listening on {}", path);

    loop {
        let (mut stream, _) = listener.accept().await?;
        tokio::spawn(async move {
            let mut buf = vec![0u8; 5120];
            let n = match stream.read(&mut buf).await {
                Ok(n) => n,
                Err(_) => return,
            };
            let command = String::from_utf8_lossy(&buf[..n]).to_string();
            let reply = serde_json::json!({ "received": command });
            let _ = stream.write_all(reply.to_string().as_bytes()).await;
        });
    }
}
