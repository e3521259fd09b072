//! Outbound delivery to connections.

use std::collections::HashMap;

use cameo_protocol::ServerMessage;
use cameo_transport::ConnectionId;
use tokio::sync::mpsc;

/// The sending half of a connection's writer channel.
pub type Outlet = mpsc::UnboundedSender<ServerMessage>;

/// Routes messages to connection writer tasks.
///
/// Delivery is at-most-once: a message for a connection that is not
/// registered, or whose writer has gone away, is dropped without retry.
/// Pushing onto a channel never blocks, so the broadcaster is safe to
/// call while the router lock is held.
#[derive(Debug, Default)]
pub struct Broadcaster {
    outlets: HashMap<ConnectionId, Outlet>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, conn: ConnectionId, outlet: Outlet) {
        self.outlets.insert(conn, outlet);
    }

    /// Dropping the outlet lets the connection's writer task finish.
    pub fn unregister(&mut self, conn: ConnectionId) {
        self.outlets.remove(&conn);
    }

    pub fn is_registered(&self, conn: ConnectionId) -> bool {
        self.outlets.contains_key(&conn)
    }

    /// Returns `true` if the message was handed to the writer.
    pub fn send_to(&self, conn: ConnectionId, msg: ServerMessage) -> bool {
        let Some(outlet) = self.outlets.get(&conn) else {
            tracing::debug!(%conn, "dropping message for unknown connection");
            return false;
        };
        if outlet.send(msg).is_err() {
            tracing::debug!(%conn, "dropping message for closed connection");
            return false;
        }
        true
    }

    /// Sends a copy to every connection except `exclude`.
    ///
    /// Returns how many were handed off.
    pub fn broadcast(
        &self,
        connections: &[ConnectionId],
        msg: &ServerMessage,
        exclude: Option<ConnectionId>,
    ) -> usize {
        let mut delivered = 0;
        for &conn in connections {
            if Some(conn) != exclude && self.send_to(conn, msg.clone()) {
                delivered += 1;
            }
        }
        delivered
    }
}
