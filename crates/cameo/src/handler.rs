//! Per-connection handler: reader loop plus writer task.
//!
//! Each accepted connection gets its own Tokio task running
//! [`handle_connection`]. The flow is:
//!   1. Register an outlet with the router and spawn a writer task that
//!      drains it onto the socket
//!   2. Loop: receive frames → hand each to the router under the lock
//!   3. On close or error: leave the game and unregister (via the guard)

use std::sync::Arc;

use cameo_protocol::{Codec, JsonCodec, ServerMessage};
use cameo_transport::{Connection, ConnectionId, WebSocketConnection};
use tokio::sync::mpsc;

use crate::server::ServerState;

/// Drop guard that takes a connection out of the router when the
/// handler exits, even by panic.
///
/// `Drop` is synchronous, so the async lock is taken in a spawned task.
struct ConnectionGuard {
    conn_id: ConnectionId,
    state: Arc<ServerState>,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        let conn_id = self.conn_id;
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            state.router.lock().await.disconnect(conn_id);
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(conn: WebSocketConnection, state: Arc<ServerState>) {
    let conn = Arc::new(conn);
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    let (outlet, inbox) = mpsc::unbounded_channel();
    state.router.lock().await.connect(conn_id, outlet);
    let _guard = ConnectionGuard {
        conn_id,
        state: Arc::clone(&state),
    };
    tokio::spawn(write_loop(Arc::clone(&conn), inbox, state.codec));

    loop {
        match conn.recv().await {
            Ok(Some(frame)) => state.router.lock().await.handle(conn_id, &frame),
            Ok(None) => {
                tracing::info!(%conn_id, "connection closed");
                break;
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                break;
            }
        }
    }

    // _guard drops here → router.disconnect fires, which drops the outlet
    // and lets the writer finish.
}

/// Drains a connection's outbound channel onto its socket.
///
/// Ends when the router drops the outlet or the socket refuses a write.
/// Messages are never retried.
async fn write_loop(
    conn: Arc<WebSocketConnection>,
    mut inbox: mpsc::UnboundedReceiver<ServerMessage>,
    codec: JsonCodec,
) {
    let conn_id = conn.id();
    while let Some(msg) = inbox.recv().await {
        let frame = match codec.encode(&msg) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(%conn_id, error = %e, "failed to encode outbound message");
                continue;
            }
        };
        if let Err(e) = conn.send(&frame).await {
            tracing::debug!(%conn_id, error = %e, "send failed, stopping writer");
            break;
        }
    }
    let _ = conn.close().await;
}
