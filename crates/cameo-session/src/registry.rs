//! The session registry: every live session and who is seated where.
//!
//! The registry owns two maps that are always updated together:
//!
//! - `sessions`: game code → [`Session`]
//! - `bindings`: connection → [`Binding`] (game code + slot)
//!
//! A connection is bound to at most one session, and every seated
//! participant of a live session has exactly one binding pointing back at
//! it. Removing a session removes the bindings of both participants.
//!
//! # Concurrency note
//!
//! `SessionRegistry` is a plain struct with `&mut self` operations. The
//! server keeps it inside the router behind one mutex, so each inbound
//! message mutates it completely before the next one is looked at.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use cameo_protocol::{GameCode, Slot};
use cameo_transport::ConnectionId;

use crate::{
    CatalogPool, CodeGenerator, GuessEvaluator, IdentityPool, Participant, RandomCodeGenerator,
    RegistryConfig, Session, SessionError, SessionStatus,
};

/// Where a connection is seated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub code: GameCode,
    pub slot: Slot,
}

/// Result of a guess that was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    pub code: GameCode,
    pub guesser: Slot,
    pub opponent: ConnectionId,
    pub correct: bool,
}

/// What a rematch request led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RematchOutcome {
    /// The connection is not in a finished session. Nothing changed.
    Ignored,
    /// First request. The opponent should be asked.
    Pending {
        requester_name: String,
        opponent: ConnectionId,
    },
    /// The same side asked again before the other answered.
    AlreadyPending,
    /// Both sides asked. `previous` is gone and `code` is the new session.
    Started { previous: GameCode, code: GameCode },
}

/// A session torn down by [`SessionRegistry::remove_by_connection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed {
    pub code: GameCode,
    /// The slot the leaving connection held.
    pub slot: Slot,
    /// The other participant, if one was seated.
    pub opponent: Option<ConnectionId>,
}

/// A waiting session dropped by [`SessionRegistry::sweep_waiting`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expired {
    pub code: GameCode,
    pub creator: ConnectionId,
}

/// Owns all live sessions and the connection bindings into them.
pub struct SessionRegistry {
    sessions: HashMap<GameCode, Session>,
    bindings: HashMap<ConnectionId, Binding>,
    codes: Box<dyn CodeGenerator>,
    identities: Box<dyn IdentityPool>,
    config: RegistryConfig,
}

impl SessionRegistry {
    /// An empty registry with random codes and the celebrity catalog.
    pub fn new(config: RegistryConfig) -> Self {
        Self::with_sources(config, RandomCodeGenerator, CatalogPool::celebrities())
    }

    /// An empty registry drawing codes and identities from the given sources.
    pub fn with_sources(
        config: RegistryConfig,
        codes: impl CodeGenerator,
        identities: impl IdentityPool,
    ) -> Self {
        Self {
            sessions: HashMap::new(),
            bindings: HashMap::new(),
            codes: Box::new(codes),
            identities: Box::new(identities),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Opens a waiting session with `conn` seated in the first slot.
    ///
    /// # Errors
    /// - [`SessionError::AlreadyInSession`] if `conn` is already bound.
    /// - [`SessionError::CapacityExhausted`] if the registry is at its
    ///   session limit or no unused code turned up within the retry budget.
    pub fn create_session(
        &mut self,
        conn: ConnectionId,
        name: impl Into<String>,
    ) -> Result<&Session, SessionError> {
        if self.bindings.contains_key(&conn) {
            return Err(SessionError::AlreadyInSession(conn));
        }
        if self.sessions.len() >= self.config.max_sessions {
            tracing::warn!(
                live = self.sessions.len(),
                max = self.config.max_sessions,
                "session limit reached"
            );
            return Err(SessionError::CapacityExhausted);
        }

        let code = self.unique_code()?;
        let creator = Participant::new(name.into(), conn, self.identities.pick());
        let session = Session::waiting(code.clone(), creator, Instant::now());

        self.bindings.insert(
            conn,
            Binding {
                code: code.clone(),
                slot: Slot::First,
            },
        );
        tracing::info!(%conn, %code, "session created");

        Ok(&*self.sessions.entry(code).or_insert(session))
    }

    /// Seats `conn` in the second slot of the waiting session `code`.
    ///
    /// # Errors
    /// - [`SessionError::AlreadyInSession`] if `conn` is already bound.
    /// - [`SessionError::NotFound`] if no live session has this code.
    /// - [`SessionError::Full`] if the session is not waiting.
    pub fn join_session(
        &mut self,
        conn: ConnectionId,
        code: &GameCode,
        name: impl Into<String>,
    ) -> Result<&Session, SessionError> {
        if self.bindings.contains_key(&conn) {
            return Err(SessionError::AlreadyInSession(conn));
        }
        let session = self
            .sessions
            .get_mut(code)
            .ok_or_else(|| SessionError::NotFound(code.clone()))?;
        if !session.status.is_joinable() {
            return Err(SessionError::Full(code.clone()));
        }

        let joiner = Participant::new(name.into(), conn, self.identities.pick());
        session.participants[Slot::Second.index()] = Some(joiner);
        session.advance(SessionStatus::Active);

        self.bindings.insert(
            conn,
            Binding {
                code: code.clone(),
                slot: Slot::Second,
            },
        );
        tracing::info!(%conn, %code, "session joined");

        Ok(&*session)
    }

    /// Records a guess from `conn` and checks it against the opponent.
    ///
    /// Returns `None` (and changes nothing) if `conn` is unbound or its
    /// session is not active. Otherwise the guess is appended to the
    /// guesser's history, and a match finishes the session with the
    /// guesser as winner.
    pub fn record_guess(&mut self, conn: ConnectionId, guess: &str) -> Option<GuessOutcome> {
        let binding = self.bindings.get(&conn)?;
        let session = self.sessions.get_mut(&binding.code)?;
        if !session.status.is_active() {
            tracing::debug!(%conn, code = %session.code, status = %session.status, "guess outside active game");
            return None;
        }

        let slot = binding.slot;
        let (target, opponent) = {
            let other = session.participant(slot.other())?;
            (other.identity.clone(), other.connection)
        };
        session.participant_mut(slot)?.guesses.push(guess.to_owned());

        let correct = GuessEvaluator::matches(guess, &target);
        if correct {
            session.advance(SessionStatus::Finished { winner: slot });
            tracing::info!(%conn, code = %session.code, winner = %slot, "session finished");
        }

        Some(GuessOutcome {
            code: session.code.clone(),
            guesser: slot,
            opponent,
            correct,
        })
    }

    /// Records that `conn` wants a rematch.
    ///
    /// Only finished sessions take rematch requests. The second side to ask
    /// triggers a brand-new active session: same players, slots and
    /// connections, but a new code, new identities and empty guess lists.
    /// The old session is dropped and both bindings move to the new code.
    ///
    /// # Errors
    /// [`SessionError::CapacityExhausted`] if no new code could be found.
    /// The finished session and the pending request are left in place.
    pub fn request_rematch(&mut self, conn: ConnectionId) -> Result<RematchOutcome, SessionError> {
        let Some(binding) = self.bindings.get(&conn).cloned() else {
            return Ok(RematchOutcome::Ignored);
        };
        let Some(session) = self.sessions.get_mut(&binding.code) else {
            return Ok(RematchOutcome::Ignored);
        };
        if session.winner().is_none() {
            return Ok(RematchOutcome::Ignored);
        }

        match session.rematch.requested_by {
            None => {
                let requester_name = match session.participant(binding.slot) {
                    Some(p) => p.name.clone(),
                    None => return Ok(RematchOutcome::Ignored),
                };
                let Some(opponent) = session.participant(binding.slot.other()) else {
                    return Ok(RematchOutcome::Ignored);
                };
                let opponent = opponent.connection;
                session.rematch.requested_by = Some(binding.slot);
                tracing::info!(%conn, code = %binding.code, "rematch requested");
                return Ok(RematchOutcome::Pending {
                    requester_name,
                    opponent,
                });
            }
            Some(slot) if slot == binding.slot => return Ok(RematchOutcome::AlreadyPending),
            Some(_) => {}
        }

        // The old session is still live here, so the new code differs from it.
        let code = self.unique_code()?;
        let Some(previous) = self.sessions.remove(&binding.code) else {
            return Ok(RematchOutcome::Ignored);
        };

        let mut participants: [Option<Participant>; 2] = [None, None];
        for (seat, old) in participants.iter_mut().zip(previous.participants) {
            if let Some(old) = old {
                *seat = Some(Participant::new(
                    old.name,
                    old.connection,
                    self.identities.pick(),
                ));
            }
        }
        for slot in Slot::BOTH {
            if let Some(p) = &participants[slot.index()] {
                self.bindings.insert(
                    p.connection,
                    Binding {
                        code: code.clone(),
                        slot,
                    },
                );
            }
        }

        self.sessions.insert(
            code.clone(),
            Session::active(code.clone(), participants, Instant::now()),
        );

        tracing::info!(previous = %previous.code, %code, "rematch started");
        Ok(RematchOutcome::Started {
            previous: previous.code,
            code,
        })
    }

    /// Tears down whatever session `conn` is in.
    ///
    /// The session is removed whatever its status and both participants
    /// are unbound. Calling this again for the same connection returns
    /// `None`.
    pub fn remove_by_connection(&mut self, conn: ConnectionId) -> Option<Removed> {
        let binding = self.bindings.remove(&conn)?;
        let session = self.sessions.remove(&binding.code)?;
        for other in session.connections() {
            self.bindings.remove(&other);
        }

        let opponent = session
            .participant(binding.slot.other())
            .map(|p| p.connection);
        tracing::info!(%conn, code = %binding.code, status = %session.status, "session removed");

        Some(Removed {
            code: binding.code,
            slot: binding.slot,
            opponent,
        })
    }

    /// Drops waiting sessions that have had no joiner for at least `ttl`.
    pub fn sweep_waiting(&mut self, now: Instant, ttl: Duration) -> Vec<Expired> {
        let stale: Vec<GameCode> = self
            .sessions
            .values()
            .filter(|s| {
                s.status.is_joinable() && now.saturating_duration_since(s.created_at) >= ttl
            })
            .map(|s| s.code.clone())
            .collect();

        let mut expired = Vec::with_capacity(stale.len());
        for code in stale {
            let Some(session) = self.sessions.remove(&code) else {
                continue;
            };
            for conn in session.connections() {
                self.bindings.remove(&conn);
                expired.push(Expired {
                    code: code.clone(),
                    creator: conn,
                });
            }
            tracing::info!(%code, "waiting session expired");
        }
        expired
    }

    pub fn get(&self, code: &GameCode) -> Option<&Session> {
        self.sessions.get(code)
    }

    pub fn binding(&self, conn: ConnectionId) -> Option<&Binding> {
        self.bindings.get(&conn)
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Asks the generator for codes until one is not in use.
    fn unique_code(&mut self) -> Result<GameCode, SessionError> {
        for attempt in 1..=self.config.code_retry_budget {
            let code = self.codes.generate();
            if !self.sessions.contains_key(&code) {
                return Ok(code);
            }
            tracing::debug!(%code, attempt, "game code collision");
        }
        tracing::warn!(
            budget = self.config.code_retry_budget,
            live = self.sessions.len(),
            "no free game code within retry budget"
        );
        Err(SessionError::CapacityExhausted)
    }
}
