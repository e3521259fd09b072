//! # Cameo
//!
//! Session coordination server for a two-player celebrity guessing game.
//!
//! One player creates a game and shares its six-digit code, the other
//! joins with it, and each is dealt a secret celebrity the opponent has
//! to guess. The server pairs the players, relays guesses, decides who
//! won, negotiates rematches and cleans up when someone leaves.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cameo::prelude::*;
//!
//! # async fn start() -> Result<(), CameoError> {
//! let server = CameoServer::builder()
//!     .config(ServerConfig::from_env())
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod broadcaster;
mod config;
mod error;
mod handler;
mod router;
mod server;

pub use broadcaster::{Broadcaster, Outlet};
pub use config::ServerConfig;
pub use error::CameoError;
pub use router::{EXPIRED_MESSAGE, MessageRouter};
pub use server::{CameoServer, CameoServerBuilder};

/// Everything needed to run or embed a server.
pub mod prelude {
    pub use crate::{CameoError, CameoServer, CameoServerBuilder, MessageRouter, ServerConfig};
    pub use cameo_protocol::{ClientMessage, GameCode, ServerMessage, Slot};
    pub use cameo_session::{RegistryConfig, SessionError, SessionRegistry};
}
