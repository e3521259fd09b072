//! Wire protocol for Cameo.
//!
//! This crate defines what players and the server say to each other:
//!
//! - **Types** ([`ClientMessage`], [`ServerMessage`], [`GameCode`],
//!   [`Slot`]) — the JSON objects that travel in text frames.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those objects are
//!   turned into frames and back.
//! - **Errors** ([`ProtocolError`]) — what can go wrong doing that.
//!
//! # Architecture
//!
//! The protocol layer sits between the transport (raw frames) and the
//! session registry (game state). It knows nothing about connections or
//! sessions.
//!
//! ```text
//! Transport (frames) → Protocol (ClientMessage) → Router → Registry
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{ClientMessage, GameCode, ServerMessage, Slot};
