//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use path_dispatch::config::DispatchConfig;
use path_dispatch::http::HttpServer;
use path_dispatch::lifecycle::Shutdown;
use path_dispatch::routing::DispatchTable;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// A dispatch server running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub table: Arc<DispatchTable>,
    pub shutdown: Shutdown,
    #[allow(dead_code)]
    pub config_tx: mpsc::UnboundedSender<DispatchConfig>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a server for `table` on 127.0.0.1 with an OS-assigned port.
pub async fn start_server(table: Arc<DispatchTable>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (config_tx, config_updates) = mpsc::unbounded_channel();
    let server = HttpServer::new(&DispatchConfig::default(), Arc::clone(&table));
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });

    TestServer {
        addr,
        table,
        shutdown,
        config_tx,
    }
}

/// A client that never reuses connections or consults proxy settings.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

/// GET `path` and return the status code and body.
pub async fn get(client: &reqwest::Client, server: &TestServer, path: &str) -> (u16, String) {
    let res = client
        .get(server.url(path))
        .send()
        .await
        .expect("server unreachable");
    let status = res.status().as_u16();
    (status, res.text().await.unwrap())
}
