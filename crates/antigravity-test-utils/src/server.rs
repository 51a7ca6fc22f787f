use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use antigravity_core::GraphStore;
use antigravity_server::{GraphServer, ServerConfig};

use crate::client::TestClient;
use crate::error::TestResult;
use crate::fixtures::memory_config;

/// The real router served on an ephemeral local port.
pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TestServer {
    /// Serve `store` with the default in-memory test configuration.
    pub async fn start(store: Arc<dyn GraphStore>) -> TestResult<Self> {
        Self::start_with_config(memory_config(), store).await
    }

    pub async fn start_with_config(
        config: ServerConfig,
        store: Arc<dyn GraphStore>,
    ) -> TestResult<Self> {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let server = GraphServer::new(config, store);
        let handle = tokio::spawn(async move {
            let shutdown = async move {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = server.serve(listener, shutdown).await {
                error!("Test server failed: {}", e);
            }
        });

        debug!("Test server listening on {}", addr);
        Ok(Self {
            addr,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> TestClient {
        TestClient::new(self.base_url())
    }

    /// Gracefully shut down and wait for the serve loop to exit.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
