// src/internal/server/server.rs

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::handler::{Handler, MockUser};

/// Local login endpoint for trying the requester without a real backend
pub struct MockServer {
    listener: TcpListener,
    handler: Handler,
}

impl MockServer {
    /// Bind to `addr`; use port 0 for an ephemeral port
    pub async fn bind(addr: &str, users: Vec<MockUser>) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to address: {}", addr))?;

        Ok(Self {
            listener,
            handler: Handler::new(users),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("Failed to read listener address")
    }

    /// Login URL served by this instance
    pub fn login_url(&self) -> Result<String> {
        Ok(format!("http://{}/user/login", self.local_addr()?))
    }

    /// Serve until the process ends
    pub async fn serve(self) -> Result<()> {
        let addr = self.local_addr()?;
        let app = self.handler.create_http_router();

        info!("Mock login server listening on {}", addr);
        info!("Endpoints:");
        info!("  - POST http://{}/user/login - form or JSON login", addr);
        info!("  - POST http://{}/echo - echo request body", addr);
        info!("  - ANY  http://{}/inspect - describe request as JSON", addr);
        info!("  - GET  http://{}/health - Health check", addr);

        axum::serve(self.listener, app)
            .await
            .context("HTTP server failed")?;

        Ok(())
    }

    /// Serve until Ctrl-C, then drain in-flight requests
    pub async fn serve_with_graceful_shutdown(self) -> Result<()> {
        let addr = self.local_addr()?;
        let app = self.handler.create_http_router();

        info!("Mock login server listening on {}", addr);

        let shutdown = async {
            if let Err(e) = signal::ctrl_c().await {
                error!("Failed to install CTRL+C signal handler: {}", e);
                return;
            }
            info!("Received shutdown signal");
        };

        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP server failed")?;

        info!("Mock login server shutdown complete");
        Ok(())
    }

    /// Serve on a background task, returning the bound address
    pub fn spawn(self) -> Result<(SocketAddr, JoinHandle<Result<()>>)> {
        let addr = self.local_addr()?;
        let handle = tokio::spawn(self.serve());
        Ok((addr, handle))
    }
}
