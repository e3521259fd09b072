//! Session types: one pairing of two players from matchmaking to teardown.
//!
//! A session tracks:
//! - WHO is playing (a [`Participant`] per [`Slot`])
//! - WHERE in the game they are ([`SessionStatus`])
//! - WHETHER a rematch has been asked for ([`RematchState`])
//! - WHEN it was opened (so idle waiting sessions can be swept)

use std::fmt;
use std::time::Instant;

use cameo_protocol::{GameCode, Slot};
use cameo_transport::ConnectionId;

// ---------------------------------------------------------------------------
// RegistryConfig
// ---------------------------------------------------------------------------

/// Limits for the session registry.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Upper bound on live sessions. Creation past this fails with
    /// `CapacityExhausted` instead of spinning on a crowded code space.
    ///
    /// Default: half of the 900 000 possible codes.
    pub max_sessions: usize,

    /// How many candidate codes to try before giving up on a create.
    ///
    /// Default: 64.
    pub code_retry_budget: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_sessions: GameCode::SPACE / 2,
            code_retry_budget: 64,
        }
    }
}

// ---------------------------------------------------------------------------
// SessionStatus
// ---------------------------------------------------------------------------

/// Where a session is in its lifecycle.
///
/// ```text
///   Waiting ──(join)──→ Active ──(correct guess)──→ Finished
/// ```
///
/// Transitions only go forward. A rematch does not rewind a session; the
/// registry replaces it with a new one that starts out `Active`. The
/// winner lives inside `Finished`, so a session has a winner exactly when
/// it is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Creator is seated, second slot is empty.
    Waiting,
    /// Both seated, guesses are accepted.
    Active,
    /// Someone guessed right. The winner never changes afterward.
    Finished { winner: Slot },
}

impl SessionStatus {
    /// Only waiting sessions accept a joiner.
    pub fn is_joinable(&self) -> bool {
        matches!(self, Self::Waiting)
    }

    /// Only active sessions accept guesses.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn winner(&self) -> Option<Slot> {
        match self {
            Self::Finished { winner } => Some(*winner),
            Self::Waiting | Self::Active => None,
        }
    }

    /// Returns `true` if moving from `self` to `next` is a legal step.
    pub fn can_transition_to(&self, next: &SessionStatus) -> bool {
        matches!(
            (self, next),
            (Self::Waiting, Self::Active) | (Self::Active, Self::Finished { .. })
        )
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::Active => write!(f, "active"),
            Self::Finished { .. } => write!(f, "finished"),
        }
    }
}

// ---------------------------------------------------------------------------
// Participant / RematchState
// ---------------------------------------------------------------------------

/// One seated player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub name: String,
    pub connection: ConnectionId,
    /// What the opponent has to guess.
    pub identity: String,
    /// Every guess this player submitted, in order, duplicates included.
    pub guesses: Vec<String>,
}

impl Participant {
    pub fn new(name: String, connection: ConnectionId, identity: String) -> Self {
        Self {
            name,
            connection,
            identity,
            guesses: Vec::new(),
        }
    }
}

/// Rematch negotiation for a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RematchState {
    /// The side that asked first, if any.
    pub requested_by: Option<Slot>,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One pairing of two players.
#[derive(Debug, Clone)]
pub struct Session {
    pub code: GameCode,
    /// Indexed by [`Slot::index`]. The second entry is `None` while waiting.
    pub participants: [Option<Participant>; 2],
    pub status: SessionStatus,
    pub rematch: RematchState,
    pub created_at: Instant,
}

impl Session {
    /// A fresh session with only the creator seated.
    pub fn waiting(code: GameCode, creator: Participant, now: Instant) -> Self {
        Self {
            code,
            participants: [Some(creator), None],
            status: SessionStatus::Waiting,
            rematch: RematchState::default(),
            created_at: now,
        }
    }

    /// A session that starts straight out active, as a rematch does.
    pub(crate) fn active(code: GameCode, participants: [Option<Participant>; 2], now: Instant) -> Self {
        Self {
            code,
            participants,
            status: SessionStatus::Active,
            rematch: RematchState::default(),
            created_at: now,
        }
    }

    pub fn participant(&self, slot: Slot) -> Option<&Participant> {
        self.participants[slot.index()].as_ref()
    }

    pub(crate) fn participant_mut(&mut self, slot: Slot) -> Option<&mut Participant> {
        self.participants[slot.index()].as_mut()
    }

    pub fn winner(&self) -> Option<Slot> {
        self.status.winner()
    }

    /// Connections of every seated player, first slot first.
    pub fn connections(&self) -> Vec<ConnectionId> {
        self.participants
            .iter()
            .flatten()
            .map(|p| p.connection)
            .collect()
    }

    /// Moves to `next` if the lifecycle allows it.
    ///
    /// Returns `false` and leaves the status alone otherwise.
    pub(crate) fn advance(&mut self, next: SessionStatus) -> bool {
        if !self.status.can_transition_to(&next) {
            tracing::warn!(
                code = %self.code,
                from = %self.status,
                to = %next,
                "rejected session status transition"
            );
            return false;
        }
        self.status = next;
        true
    }
}
