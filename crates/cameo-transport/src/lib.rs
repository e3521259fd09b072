//! Sockets between Cameo players and the game server.
//!
//! The server only ever writes JSON text frames. Players may send either
//! text or binary frames; both reach the server as the same byte buffer,
//! and deciding whether it is a valid message is the codec's job.
//!
//! `websocket` (on by default) pulls in the `tokio-tungstenite` listener.
//! Without it only the traits and [`ConnectionId`] remain.

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
#[cfg(feature = "websocket")]
pub use websocket::{WebSocketConnection, WebSocketTransport};

use std::fmt;
use std::net::SocketAddr;

/// Names one player socket for as long as it stays open.
///
/// The registry seats a player by this id and the broadcaster routes
/// outbound messages by it. Ids are never reused within one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Where the server's accept loop gets new players from.
pub trait Transport: Send + Sync + 'static {
    type Connection: Connection;
    type Error: std::error::Error + Send + Sync;

    /// Next player socket, already past any handshake.
    async fn accept(&mut self) -> Result<Self::Connection, Self::Error>;

    /// Bound address; tests bind port 0 and read the real port here.
    fn local_addr(&self) -> Result<SocketAddr, Self::Error>;
}

/// One player's socket.
///
/// The connection handler reads from it while a separate writer task
/// drains the player's outbox into `send`, so both take `&self`.
pub trait Connection: Send + Sync + 'static {
    type Error: std::error::Error + Send + Sync;

    /// Writes one encoded server message as a text frame.
    async fn send(&self, frame: &str) -> Result<(), Self::Error>;

    /// Payload of the next text or binary frame from the player.
    ///
    /// `Ok(None)` means the player went away; the handler then leaves
    /// their game.
    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error>;

    async fn close(&self) -> Result<(), Self::Error>;

    fn id(&self) -> ConnectionId;
}
