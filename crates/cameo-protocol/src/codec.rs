//! Codec trait and implementations for turning messages into frames.
//!
//! The server never touches `serde_json` directly; it asks a [`Codec`] to
//! encode outbound messages into text frames and decode inbound frames
//! into [`ClientMessage`](crate::ClientMessage)s. [`JsonCodec`] is the
//! only implementation, since browsers speak JSON over the socket.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that encodes values into text frames and decodes raw frames
/// back into values.
///
/// ## Trait bounds
///
/// - `Send + Sync` → one codec instance is shared by every connection
///   task, and Tokio may run those tasks on any worker thread.
/// - `'static` → the codec lives as long as the server.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into a text frame.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError>;

    /// Deserializes a raw frame into a value.
    ///
    /// # Errors
    /// - `ProtocolError::InvalidMessage` for an empty frame.
    /// - `ProtocolError::Decode` if the bytes are not valid JSON or don't
    ///   match the expected shape (including an unknown `type` tag).
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// ## Example
///
/// ```rust
/// use cameo_protocol::{ClientMessage, Codec, JsonCodec};
///
/// let codec = JsonCodec;
/// let msg: ClientMessage = codec
///     .decode(br#"{"type":"createGame","playerName":"Ana"}"#)
///     .unwrap();
/// assert_eq!(msg, ClientMessage::CreateGame { player_name: "Ana".into() });
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError> {
        serde_json::to_string(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        if data.iter().all(u8::is_ascii_whitespace) {
            return Err(ProtocolError::InvalidMessage("empty frame".into()));
        }
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
