//! Signaling server listener
//!
//! Handles TCP accept loop and spawns connection handlers.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;

use crate::error::Result;
use crate::hub::SignalingHub;
use crate::server::config::ServerConfig;
use crate::server::connection::Connection;

/// WebSocket signaling server
pub struct SignalingServer {
    config: ServerConfig,
    hub: Arc<SignalingHub>,
    listener: TcpListener,
    connection_semaphore: Option<Arc<Semaphore>>,
}

impl SignalingServer {
    /// Bind the listener
    ///
    /// The hub is created here and shared with every connection task.
    /// Binding port 0 picks a free port; see [`SignalingServer::local_addr`].
    pub async fn bind(config: ServerConfig) -> Result<Self> {
        let listener = TcpListener::bind(config.bind_addr).await?;
        tracing::info!(addr = %config.bind_addr, "Signaling server listening");

        let connection_semaphore = if config.max_connections > 0 {
            Some(Arc::new(Semaphore::new(config.max_connections)))
        } else {
            None
        };

        Ok(Self {
            config,
            hub: Arc::new(SignalingHub::new()),
            listener,
            connection_semaphore,
        })
    }

    /// Get a reference to the signaling hub
    pub fn hub(&self) -> &Arc<SignalingHub> {
        &self.hub
    }

    /// Local address actually bound
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Run the server
    ///
    /// This method blocks until the server is shut down.
    pub async fn run(&self) -> Result<()> {
        self.accept_loop().await
    }

    /// Run the server with graceful shutdown
    pub async fn run_until<F>(&self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()>,
    {
        tokio::select! {
            _ = shutdown => {
                tracing::info!("Shutdown signal received");
                Ok(())
            }
            result = self.accept_loop() => result,
        }
    }

    async fn accept_loop(&self) -> Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((socket, peer_addr)) => {
                    self.handle_connection(socket, peer_addr);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }

    fn handle_connection(&self, socket: TcpStream, peer_addr: SocketAddr) {
        // Check connection limit; the permit rides along with the task.
        let permit = if let Some(ref sem) = self.connection_semaphore {
            match sem.clone().try_acquire_owned() {
                Ok(permit) => Some(permit),
                Err(_) => {
                    tracing::warn!(peer = %peer_addr, "Connection rejected: limit reached");
                    return;
                }
            }
        } else {
            None
        };

        if let Err(e) = self.configure_socket(&socket) {
            tracing::error!(error = %e, "Failed to configure socket");
            return;
        }

        tracing::debug!(peer = %peer_addr, "New connection");

        let hub = Arc::clone(&self.hub);

        tokio::spawn(async move {
            let _permit = permit;

            match Connection::accept(socket, peer_addr, hub).await {
                Ok(connection) => {
                    if let Err(e) = connection.run().await {
                        tracing::debug!(peer = %peer_addr, error = %e, "Connection error");
                    }
                }
                Err(e) => {
                    tracing::debug!(peer = %peer_addr, error = %e, "WebSocket upgrade failed");
                }
            }

            tracing::debug!(peer = %peer_addr, "Connection closed");
        });
    }

    fn configure_socket(&self, socket: &TcpStream) -> std::io::Result<()> {
        if self.config.tcp_nodelay {
            socket.set_nodelay(true)?;
        }

        Ok(())
    }

    /// Get the configured bind address
    pub fn bind_addr(&self) -> SocketAddr {
        self.config.bind_addr
    }
}
