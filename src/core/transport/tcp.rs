//! TCP transport implementation.
//!
//! Line-delimited JSON-RPC over raw TCP sockets. Every connection gets its
//! own MCP session; sessions share the server's tool registry.

use std::net::SocketAddr;

use rmcp::ServiceExt;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use super::{TransportError, TransportResult, config::TcpConfig};
use crate::core::McpServer;

/// Delay before accepting again after a failed `accept`.
const ACCEPT_BACKOFF_MS: u64 = 100;

/// TCP transport handler.
pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    /// Create a new TCP transport with the given config.
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Accept connections until the process is stopped.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {} (JSON-RPC over TCP)", addr);

        loop {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    if let Err(e) = stream.set_nodelay(true) {
                        warn!(%peer, "Failed to set TCP_NODELAY: {}", e);
                    }
                    tokio::spawn(Self::serve_client(server.clone(), stream, peer));
                }
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    tokio::time::sleep(tokio::time::Duration::from_millis(ACCEPT_BACKOFF_MS))
                        .await;
                }
            }
        }
    }

    /// Run one MCP session over an accepted connection.
    async fn serve_client(server: McpServer, stream: TcpStream, peer: SocketAddr) {
        info!(%peer, "Client connected");

        let service = match server.serve(stream).await {
            Ok(service) => service,
            Err(e) => {
                warn!(%peer, "MCP handshake failed: {}", e);
                return;
            }
        };

        match service.waiting().await {
            Ok(_) => info!(%peer, "Client disconnected"),
            Err(e) => warn!(%peer, "Session ended with error: {}", e),
        }
    }
}
