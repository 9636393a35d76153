//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use edge_session::config::EdgeConfig;
use edge_session::{HttpServer, Shutdown};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A server running on an ephemeral local port.
pub struct RunningServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub task: JoinHandle<std::io::Result<()>>,
}

impl RunningServer {
    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{}", self.addr, path_and_query)
    }
}

/// Bind to 127.0.0.1:0 and run `server` in the background.
pub async fn spawn_server(server: HttpServer) -> RunningServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let task = tokio::spawn(server.run(listener, shutdown.signalled()));

    // Give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;

    RunningServer {
        addr,
        shutdown,
        task,
    }
}

/// Default config bound to an ephemeral port.
pub fn test_config() -> EdgeConfig {
    let mut config = EdgeConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config
}

/// A client that never reuses connections between tests.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
