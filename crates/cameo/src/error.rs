//! Unified error type for the Cameo server.

use cameo_protocol::ProtocolError;
use cameo_session::SessionError;
use cameo_transport::TransportError;

/// Top-level error that wraps the error of every layer.
///
/// The `#[from]` attributes let `?` lift a layer's error into this one.
#[derive(Debug, thiserror::Error)]
pub enum CameoError {
    /// Binding, accepting, sending or receiving failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A frame could not be encoded or decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session operation was refused.
    #[error(transparent)]
    Session(#[from] SessionError),
}
