//! Wire types for Cameo.
//!
//! Every frame on the socket is a JSON object with a `type` discriminator
//! followed by camelCase fields, e.g.
//! `{"type":"joinGame","playerName":"Bo","gameCode":"123456"}`.
//! The serde attributes in this module pin that shape, so any change here
//! is a change to what browsers see.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// GameCode
// ---------------------------------------------------------------------------

/// The shared code two players use to meet: six decimal digits.
///
/// Inbound codes are taken as-is (a code the player mistyped is simply a
/// code no session has), so deserialization does not validate. Codes the
/// server issues always satisfy [`GameCode::is_well_formed`].
///
/// `#[serde(transparent)]` keeps it a plain JSON string: `"123456"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameCode(String);

impl GameCode {
    /// Smallest code the server hands out.
    pub const MIN: u32 = 100_000;
    /// Largest code the server hands out.
    pub const MAX: u32 = 999_999;
    /// Number of distinct codes in `MIN..=MAX`.
    pub const SPACE: usize = (Self::MAX - Self::MIN + 1) as usize;

    /// Wraps any string as a code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Formats a number in `MIN..=MAX` as a code.
    pub fn from_number(n: u32) -> Self {
        debug_assert!((Self::MIN..=Self::MAX).contains(&n), "code {n} out of range");
        Self(n.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for exactly six ASCII digits not starting with `0`.
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == 6
            && self.0.bytes().all(|b| b.is_ascii_digit())
            && !self.0.starts_with('0')
    }
}

impl fmt::Display for GameCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lets a `HashMap<GameCode, _>` be queried with a plain `&str`.
impl Borrow<str> for GameCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Slot
// ---------------------------------------------------------------------------

/// A participant's fixed position in a session.
///
/// The creator is always `First`, the joiner always `Second`; the slot
/// never changes for the life of a session (and carries over into a
/// rematch). On the wire the slots are `"player1"` and `"player2"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    #[serde(rename = "player1")]
    First,
    #[serde(rename = "player2")]
    Second,
}

impl Slot {
    /// Both slots, in order.
    pub const BOTH: [Slot; 2] = [Slot::First, Slot::Second];

    /// The opposing slot.
    pub fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }

    /// Zero-based index, for `[T; 2]` storage.
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "player1"),
            Self::Second => write!(f, "player2"),
        }
    }
}

// ---------------------------------------------------------------------------
// ClientMessage — browser → server
// ---------------------------------------------------------------------------

/// Everything a player's browser can send.
///
/// `tag = "type"` makes this internally tagged, and the two `rename_all`
/// attributes give camelCase for both the tag values (`createGame`) and
/// the field names (`playerName`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Open a new session and wait for an opponent.
    CreateGame { player_name: String },

    /// Join the waiting session with this code.
    JoinGame {
        player_name: String,
        game_code: GameCode,
    },

    /// Guess the opponent's identity.
    Guess { game_code: GameCode, guess: String },

    /// Ask for a fresh round against the same opponent.
    Rematch {
        game_code: GameCode,
        #[serde(default)]
        player_name: String,
    },

    /// Leave the current session but keep the socket open.
    Disconnect,
}

impl ClientMessage {
    /// The wire name of this message's `type`, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CreateGame { .. } => "createGame",
            Self::JoinGame { .. } => "joinGame",
            Self::Guess { .. } => "guess",
            Self::Rematch { .. } => "rematch",
            Self::Disconnect => "disconnect",
        }
    }
}

// ---------------------------------------------------------------------------
// ServerMessage — server → browser
// ---------------------------------------------------------------------------

/// Everything the server sends to a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// Reply to `createGame`: the code to share and the creator's identity.
    GameCreated {
        game_code: GameCode,
        identity: String,
        player_name: String,
    },

    /// Reply to a successful `joinGame`.
    GameJoined {
        game_code: GameCode,
        your_identity: String,
        opponent_name: String,
        opponent_identity: String,
    },

    /// Tells the creator that someone joined.
    OpponentJoined {
        opponent_name: String,
        opponent_identity: String,
    },

    /// Relays the opponent's guess.
    OpponentGuess { guess: String },

    /// The server's verdict on the player's own guess.
    GuessResult { guess: String, correct: bool },

    /// Sent to both players when a guess matches.
    GameOver {
        winner: Slot,
        winner_name: String,
        player1_identity: String,
        player2_identity: String,
    },

    /// Tells a player their opponent wants a rematch.
    RematchRequest { requester_name: String },

    /// Both sides asked; a fresh session with this code has started.
    RematchAccepted {
        game_code: GameCode,
        your_identity: String,
        opponent_identity: String,
    },

    /// The opponent left or dropped; the session is gone.
    OpponentDisconnected,

    /// A request failed. The connection stays usable.
    Error { message: String },
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! These tests pin the JSON shapes browsers depend on.

    use serde_json::json;

    use super::*;

    fn to_json<T: Serialize>(value: &T) -> serde_json::Value {
        serde_json::to_value(value).unwrap()
    }

    // =====================================================================
    // GameCode / Slot
    // =====================================================================

    #[test]
    fn test_game_code_serializes_as_plain_string() {
        assert_eq!(to_json(&GameCode::new("123456")), json!("123456"));
    }

    #[test]
    fn test_game_code_from_number_bounds_are_well_formed() {
        assert!(GameCode::from_number(GameCode::MIN).is_well_formed());
        assert!(GameCode::from_number(GameCode::MAX).is_well_formed());
        assert_eq!(GameCode::SPACE, 900_000);
    }

    #[test]
    fn test_game_code_is_well_formed_rejects_bad_shapes() {
        assert!(!GameCode::new("12345").is_well_formed());
        assert!(!GameCode::new("1234567").is_well_formed());
        assert!(!GameCode::new("012345").is_well_formed());
        assert!(!GameCode::new("12a456").is_well_formed());
        assert!(!GameCode::new("").is_well_formed());
    }

    #[test]
    fn test_game_code_borrow_allows_str_lookup() {
        let mut map = std::collections::HashMap::new();
        map.insert(GameCode::new("654321"), 1);
        assert_eq!(map.get("654321"), Some(&1));
    }

    #[test]
    fn test_slot_wire_names() {
        assert_eq!(to_json(&Slot::First), json!("player1"));
        assert_eq!(to_json(&Slot::Second), json!("player2"));
        assert_eq!(Slot::Second.to_string(), "player2");
    }

    #[test]
    fn test_slot_other_and_index() {
        assert_eq!(Slot::First.other(), Slot::Second);
        assert_eq!(Slot::Second.other(), Slot::First);
        assert_eq!(Slot::BOTH.map(Slot::index), [0, 1]);
    }

    // =====================================================================
    // ClientMessage
    // =====================================================================

    #[test]
    fn test_client_create_game_parses() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"createGame","playerName":"Ana"}"#).unwrap();
        assert_eq!(msg, ClientMessage::CreateGame { player_name: "Ana".into() });
        assert_eq!(msg.kind(), "createGame");
    }

    #[test]
    fn test_client_join_game_parses_code_as_string() {
        let msg: ClientMessage = serde_json::from_str(
            r#"{"type":"joinGame","playerName":"Bo","gameCode":"123456"}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            ClientMessage::JoinGame {
                player_name: "Bo".into(),
                game_code: GameCode::new("123456"),
            }
        );
    }

    #[test]
    fn test_client_guess_parses() {
        let msg: ClientMessage = serde_json::from_str(
            r#"{"type":"guess","gameCode":"123456","guess":"Drake"}"#,
        )
        .unwrap();
        assert!(matches!(msg, ClientMessage::Guess { ref guess, .. } if guess == "Drake"));
    }

    #[test]
    fn test_client_rematch_player_name_is_optional() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"rematch","gameCode":"123456"}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::Rematch {
                game_code: GameCode::new("123456"),
                player_name: String::new(),
            }
        );
    }

    #[test]
    fn test_client_disconnect_parses_without_fields() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"disconnect"}"#).unwrap();
        assert_eq!(msg, ClientMessage::Disconnect);
    }

    #[test]
    fn test_client_unknown_type_fails() {
        let result: Result<ClientMessage, _> =
            serde_json::from_str(r#"{"type":"flyToMoon","speed":9000}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_client_missing_type_fails() {
        let result: Result<ClientMessage, _> = serde_json::from_str(r#"{"playerName":"Ana"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_client_missing_required_field_fails() {
        let result: Result<ClientMessage, _> =
            serde_json::from_str(r#"{"type":"joinGame","playerName":"Bo"}"#);
        assert!(result.is_err());
    }

    // =====================================================================
    // ServerMessage
    // =====================================================================

    #[test]
    fn test_server_game_created_json_format() {
        let msg = ServerMessage::GameCreated {
            game_code: GameCode::new("123456"),
            identity: "Drake".into(),
            player_name: "Ana".into(),
        };
        assert_eq!(
            to_json(&msg),
            json!({
                "type": "gameCreated",
                "gameCode": "123456",
                "identity": "Drake",
                "playerName": "Ana",
            })
        );
    }

    #[test]
    fn test_server_game_joined_json_format() {
        let msg = ServerMessage::GameJoined {
            game_code: GameCode::new("123456"),
            your_identity: "Adele".into(),
            opponent_name: "Ana".into(),
            opponent_identity: "Drake".into(),
        };
        assert_eq!(
            to_json(&msg),
            json!({
                "type": "gameJoined",
                "gameCode": "123456",
                "yourIdentity": "Adele",
                "opponentName": "Ana",
                "opponentIdentity": "Drake",
            })
        );
    }

    #[test]
    fn test_server_opponent_joined_json_format() {
        let msg = ServerMessage::OpponentJoined {
            opponent_name: "Bo".into(),
            opponent_identity: "Adele".into(),
        };
        assert_eq!(
            to_json(&msg),
            json!({"type": "opponentJoined", "opponentName": "Bo", "opponentIdentity": "Adele"})
        );
    }

    #[test]
    fn test_server_game_over_json_format() {
        let msg = ServerMessage::GameOver {
            winner: Slot::Second,
            winner_name: "Bo".into(),
            player1_identity: "Drake".into(),
            player2_identity: "Adele".into(),
        };
        assert_eq!(
            to_json(&msg),
            json!({
                "type": "gameOver",
                "winner": "player2",
                "winnerName": "Bo",
                "player1Identity": "Drake",
                "player2Identity": "Adele",
            })
        );
    }

    #[test]
    fn test_server_rematch_messages_json_format() {
        let request = ServerMessage::RematchRequest { requester_name: "Ana".into() };
        assert_eq!(
            to_json(&request),
            json!({"type": "rematchRequest", "requesterName": "Ana"})
        );

        let accepted = ServerMessage::RematchAccepted {
            game_code: GameCode::new("777777"),
            your_identity: "Shakira".into(),
            opponent_identity: "Neymar".into(),
        };
        assert_eq!(
            to_json(&accepted),
            json!({
                "type": "rematchAccepted",
                "gameCode": "777777",
                "yourIdentity": "Shakira",
                "opponentIdentity": "Neymar",
            })
        );
    }

    #[test]
    fn test_server_unit_and_error_json_format() {
        assert_eq!(
            to_json(&ServerMessage::OpponentDisconnected),
            json!({"type": "opponentDisconnected"})
        );
        assert_eq!(
            to_json(&ServerMessage::Error { message: "nope".into() }),
            json!({"type": "error", "message": "nope"})
        );
        assert_eq!(
            to_json(&ServerMessage::GuessResult { guess: "drake".into(), correct: true }),
            json!({"type": "guessResult", "guess": "drake", "correct": true})
        );
        assert_eq!(
            to_json(&ServerMessage::OpponentGuess { guess: "drake".into() }),
            json!({"type": "opponentGuess", "guess": "drake"})
        );
    }
}
