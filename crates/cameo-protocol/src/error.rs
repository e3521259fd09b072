//! Error types for the protocol layer.
//!
//! Each Cameo crate defines its own error enum. A `ProtocolError` always
//! means a frame could not be turned into a message (or back), never a
//! networking or game-state problem.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a message into a frame).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed: malformed JSON, a missing or unknown
    /// `type` tag, or a required field of the wrong shape.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The frame is unusable before JSON parsing even starts, such as an
    /// empty frame.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
