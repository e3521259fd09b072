//! Session management for Cameo.
//!
//! This crate holds the game state and the rules around it:
//!
//! 1. **Codes** — proposing six-digit game codes ([`CodeGenerator`])
//! 2. **Identities** — drawing secret identities ([`IdentityPool`])
//! 3. **Guesses** — deciding whether a guess names an identity
//!    ([`GuessEvaluator`])
//! 4. **Registry** — every live session and which connection sits where
//!    ([`SessionRegistry`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Router (above)  ← turns registry outcomes into outbound messages
//!     ↕
//! Session Layer (this crate)  ← owns sessions and bindings
//!     ↕
//! Protocol / Transport (below)  ← provide GameCode, Slot, ConnectionId
//! ```
//!
//! Nothing here does I/O. Every operation is synchronous and completes
//! before it returns.
//!
//! # Feature Flags
//!
//! - `test-util` — scripted [`CodeGenerator`] and [`IdentityPool`]
//!   implementations in [`testing`]

mod codes;
mod error;
mod guess;
mod identity;
mod registry;
mod session;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use codes::{CodeGenerator, RandomCodeGenerator};
pub use error::SessionError;
pub use guess::GuessEvaluator;
pub use identity::{CELEBRITIES, CatalogPool, IdentityPool};
pub use registry::{Binding, Expired, GuessOutcome, RematchOutcome, Removed, SessionRegistry};
pub use session::{Participant, RegistryConfig, RematchState, Session, SessionStatus};
