//! Inbound message dispatch.
//!
//! The router is the only thing that mutates the registry. The server
//! keeps it behind one mutex and calls into it once per inbound frame,
//! per closed connection and per sweep tick; each call runs to completion
//! and only queues outbound messages, so nothing else observes a half
//! applied change.

use std::time::{Duration, Instant};

use cameo_protocol::{ClientMessage, Codec, GameCode, JsonCodec, ServerMessage, Slot};
use cameo_session::{RematchOutcome, Session, SessionError, SessionRegistry};
use cameo_transport::ConnectionId;

use crate::broadcaster::{Broadcaster, Outlet};

/// Sent to a creator whose game was swept before anyone joined.
pub const EXPIRED_MESSAGE: &str = "Your game expired before anyone joined. Please create a new one.";

/// Turns client messages into registry operations and outbound messages.
pub struct MessageRouter {
    registry: SessionRegistry,
    broadcaster: Broadcaster,
    codec: JsonCodec,
}

impl MessageRouter {
    pub fn new(registry: SessionRegistry) -> Self {
        Self {
            registry,
            broadcaster: Broadcaster::new(),
            codec: JsonCodec,
        }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Starts delivering outbound messages for `conn` to `outlet`.
    pub fn connect(&mut self, conn: ConnectionId, outlet: Outlet) {
        if self.broadcaster.is_registered(conn) {
            tracing::warn!(%conn, "replacing outlet of already registered connection");
        }
        self.broadcaster.register(conn, outlet);
        tracing::debug!(%conn, "connection registered");
    }

    /// The connection is gone: leave its game and stop delivering to it.
    pub fn disconnect(&mut self, conn: ConnectionId) {
        self.leave(conn);
        self.broadcaster.unregister(conn);
        tracing::debug!(%conn, "connection unregistered");
    }

    /// Decodes one raw frame and dispatches it.
    ///
    /// Frames that are not a known message are logged and dropped; the
    /// sender gets no reply.
    pub fn handle(&mut self, conn: ConnectionId, raw: &[u8]) {
        match self.codec.decode::<ClientMessage>(raw) {
            Ok(msg) => self.dispatch(conn, msg),
            Err(e) => tracing::debug!(%conn, error = %e, "dropping malformed frame"),
        }
    }

    pub fn dispatch(&mut self, conn: ConnectionId, msg: ClientMessage) {
        tracing::debug!(%conn, kind = msg.kind(), "dispatching");
        match msg {
            ClientMessage::CreateGame { player_name } => self.create_game(conn, player_name),
            ClientMessage::JoinGame {
                player_name,
                game_code,
            } => self.join_game(conn, &game_code, player_name),
            ClientMessage::Guess { game_code, guess } => {
                self.note_stale_code(conn, &game_code);
                self.guess(conn, guess);
            }
            ClientMessage::Rematch { game_code, .. } => {
                self.note_stale_code(conn, &game_code);
                self.rematch(conn);
            }
            ClientMessage::Disconnect => self.leave(conn),
        }
    }

    /// Drops waiting games older than `ttl` and tells their creators.
    ///
    /// Returns how many games were dropped.
    pub fn sweep(&mut self, now: Instant, ttl: Duration) -> usize {
        let expired = self.registry.sweep_waiting(now, ttl);
        for gone in &expired {
            self.broadcaster.send_to(
                gone.creator,
                ServerMessage::Error {
                    message: EXPIRED_MESSAGE.to_string(),
                },
            );
        }
        expired.len()
    }

    fn create_game(&mut self, conn: ConnectionId, player_name: String) {
        self.leave(conn);
        let reply = match self.registry.create_session(conn, player_name) {
            Ok(session) => match session.participant(Slot::First) {
                Some(creator) => ServerMessage::GameCreated {
                    game_code: session.code.clone(),
                    identity: creator.identity.clone(),
                    player_name: creator.name.clone(),
                },
                None => return,
            },
            Err(e) => error_reply(&e),
        };
        self.broadcaster.send_to(conn, reply);
    }

    fn join_game(&mut self, conn: ConnectionId, code: &GameCode, player_name: String) {
        self.leave(conn);
        let session = match self.registry.join_session(conn, code, player_name) {
            Ok(session) => session,
            Err(e) => {
                tracing::debug!(%conn, %code, error = %e, "join refused");
                self.broadcaster.send_to(conn, error_reply(&e));
                return;
            }
        };
        let (Some(creator), Some(joiner)) = (
            session.participant(Slot::First),
            session.participant(Slot::Second),
        ) else {
            return;
        };

        self.broadcaster.send_to(
            joiner.connection,
            ServerMessage::GameJoined {
                game_code: session.code.clone(),
                your_identity: joiner.identity.clone(),
                opponent_name: creator.name.clone(),
                opponent_identity: creator.identity.clone(),
            },
        );
        self.broadcaster.send_to(
            creator.connection,
            ServerMessage::OpponentJoined {
                opponent_name: joiner.name.clone(),
                opponent_identity: joiner.identity.clone(),
            },
        );
    }

    fn guess(&mut self, conn: ConnectionId, guess: String) {
        let Some(outcome) = self.registry.record_guess(conn, &guess) else {
            return;
        };

        self.broadcaster.send_to(
            outcome.opponent,
            ServerMessage::OpponentGuess {
                guess: guess.clone(),
            },
        );
        self.broadcaster.send_to(
            conn,
            ServerMessage::GuessResult {
                guess,
                correct: outcome.correct,
            },
        );

        if outcome.correct {
            if let Some(session) = self.registry.get(&outcome.code) {
                if let Some(over) = game_over(session) {
                    self.broadcaster.broadcast(&session.connections(), &over, None);
                }
            }
        }
    }

    fn rematch(&mut self, conn: ConnectionId) {
        match self.registry.request_rematch(conn) {
            Ok(RematchOutcome::Pending {
                requester_name,
                opponent,
            }) => {
                self.broadcaster
                    .send_to(opponent, ServerMessage::RematchRequest { requester_name });
            }
            Ok(RematchOutcome::Started { code, .. }) => {
                let Some(session) = self.registry.get(&code) else {
                    return;
                };
                for slot in Slot::BOTH {
                    let (Some(me), Some(them)) =
                        (session.participant(slot), session.participant(slot.other()))
                    else {
                        continue;
                    };
                    self.broadcaster.send_to(
                        me.connection,
                        ServerMessage::RematchAccepted {
                            game_code: code.clone(),
                            your_identity: me.identity.clone(),
                            opponent_identity: them.identity.clone(),
                        },
                    );
                }
            }
            Ok(RematchOutcome::AlreadyPending | RematchOutcome::Ignored) => {
                tracing::debug!(%conn, "rematch request had no effect");
            }
            Err(e) => {
                tracing::warn!(%conn, error = %e, "rematch failed");
                let connections = self
                    .registry
                    .binding(conn)
                    .and_then(|b| self.registry.get(&b.code))
                    .map(Session::connections)
                    .unwrap_or_default();
                self.broadcaster
                    .broadcast(&connections, &error_reply(&e), None);
            }
        }
    }

    /// Removes `conn` from its game, if any, and tells the opponent.
    fn leave(&mut self, conn: ConnectionId) {
        let Some(removed) = self.registry.remove_by_connection(conn) else {
            return;
        };
        if let Some(opponent) = removed.opponent {
            self.broadcaster
                .send_to(opponent, ServerMessage::OpponentDisconnected);
        }
    }

    /// The binding decides which game a guess or rematch is for. Clients
    /// keep sending the code they joined with after a rematch, so a
    /// different code is only logged.
    fn note_stale_code(&self, conn: ConnectionId, sent: &GameCode) {
        if let Some(binding) = self.registry.binding(conn) {
            if binding.code != *sent {
                tracing::debug!(%conn, %sent, bound = %binding.code, "message code differs from bound game");
            }
        }
    }
}

fn error_reply(err: &SessionError) -> ServerMessage {
    ServerMessage::Error {
        message: err.user_message(),
    }
}

fn game_over(session: &Session) -> Option<ServerMessage> {
    let winner = session.winner()?;
    Some(ServerMessage::GameOver {
        winner,
        winner_name: session.participant(winner)?.name.clone(),
        player1_identity: session.participant(Slot::First)?.identity.clone(),
        player2_identity: session.participant(Slot::Second)?.identity.clone(),
    })
}
