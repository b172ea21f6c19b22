//! Shared utilities for integration tests.

use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use vhost_router::config::VhostServerConfig;
use vhost_router::http::HttpServer;
use vhost_router::lifecycle::Shutdown;

/// Start a server for `config` on an ephemeral port.
#[allow(dead_code)]
pub async fn start_server(config: VhostServerConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Send a raw HTTP/1.1 GET with an arbitrary Host header.
///
/// Returns the status code and body.
#[allow(dead_code)]
pub async fn send_request(addr: SocketAddr, host: Option<&str>) -> (u16, String) {
    let mut socket = TcpStream::connect(addr).await.unwrap();

    let mut request = String::from("GET / HTTP/1.1\r\nConnection: close\r\n");
    if let Some(host) = host {
        request.push_str(&format!("Host: {}\r\n", host));
    }
    request.push_str("\r\n");
    socket.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    socket.read_to_end(&mut raw).await.unwrap();
    let raw = String::from_utf8_lossy(&raw).into_owned();

    let status = raw
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let body = raw
        .split_once("\r\n\r\n")
        .map(|(_, b)| b.to_string())
        .unwrap_or_default();

    (status, body)
}
