//! `CameoServer` builder and server loop.
//!
//! This is the entry point for running a Cameo server. It ties the layers
//! together: transport → handler → router → registry.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use cameo_protocol::JsonCodec;
use cameo_session::SessionRegistry;
use cameo_transport::{Transport, WebSocketTransport};
use tokio::sync::Mutex;

use crate::handler::handle_connection;
use crate::{CameoError, MessageRouter, ServerConfig};

/// Shared server state passed to each connection task.
///
/// The router sits behind a single mutex: one inbound message, close or
/// sweep pass at a time, each applied in full.
pub(crate) struct ServerState {
    pub(crate) router: Mutex<MessageRouter>,
    pub(crate) codec: JsonCodec,
}

/// Builder for configuring and starting a Cameo server.
///
/// # Example
///
/// ```rust,no_run
/// use cameo::prelude::*;
///
/// # async fn start() -> Result<(), CameoError> {
/// let server = CameoServer::builder()
///     .bind("127.0.0.1:3000")
///     .build()
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct CameoServerBuilder {
    config: ServerConfig,
    bind_addr: Option<String>,
    registry: Option<SessionRegistry>,
}

impl CameoServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
            bind_addr: None,
            registry: None,
        }
    }

    /// Sets the address to listen on, overriding the config's host and port.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = Some(addr.to_string());
        self
    }

    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses a prepared registry instead of one built from the config.
    pub fn registry(mut self, registry: SessionRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Binds the listener. The server does not accept until [`CameoServer::run`].
    pub async fn build(self) -> Result<CameoServer, CameoError> {
        let addr = self.bind_addr.unwrap_or_else(|| self.config.bind_addr());
        let transport = WebSocketTransport::bind(&addr).await?;

        let registry = self
            .registry
            .unwrap_or_else(|| SessionRegistry::new(self.config.registry()));
        let state = Arc::new(ServerState {
            router: Mutex::new(MessageRouter::new(registry)),
            codec: JsonCodec,
        });

        Ok(CameoServer {
            transport,
            state,
            config: self.config,
        })
    }
}

impl Default for CameoServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound Cameo server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct CameoServer {
    transport: WebSocketTransport,
    state: Arc<ServerState>,
    config: ServerConfig,
}

impl CameoServer {
    /// Creates a new builder.
    pub fn builder() -> CameoServerBuilder {
        CameoServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, CameoError> {
        Ok(self.transport.local_addr()?)
    }

    /// Runs the sweep timer and the accept loop.
    ///
    /// Spawns a handler task per accepted connection. Runs until the
    /// process is terminated; a failed accept is logged and skipped.
    pub async fn run(mut self) -> Result<(), CameoError> {
        tracing::info!(addr = %self.local_addr()?, "Cameo server running");
        tokio::spawn(sweep_loop(Arc::clone(&self.state), self.config.clone()));

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    tokio::spawn(handle_connection(conn, Arc::clone(&self.state)));
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}

/// Periodically drops waiting games that nobody joined in time.
async fn sweep_loop(state: Arc<ServerState>, config: ServerConfig) {
    let ttl = config.waiting_ttl();
    let mut ticker = tokio::time::interval(config.sweep_interval());
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let expired = state.router.lock().await.sweep(Instant::now(), ttl);
        if expired > 0 {
            tracing::info!(expired, "swept idle waiting games");
        }
    }
}
