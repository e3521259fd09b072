//! Error types for the session layer.

use cameo_protocol::GameCode;
use cameo_transport::ConnectionId;

/// Errors that can occur while creating or joining sessions.
///
/// None of these are fatal: the router turns each one into an `error`
/// reply to the connection that caused it, and every other session keeps
/// running.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No live session has this code.
    #[error("game {0} not found")]
    NotFound(GameCode),

    /// The session already has two players (it is active or finished).
    #[error("game {0} is full")]
    Full(GameCode),

    /// No unused code could be found within the retry budget, or the
    /// registry is at its session limit.
    #[error("no free game codes")]
    CapacityExhausted,

    /// The connection is already bound to a session.
    #[error("{0} is already in a game")]
    AlreadyInSession(ConnectionId),

    /// An identity catalog must offer at least two names.
    #[error("identity catalog needs at least 2 entries, got {0}")]
    CatalogTooSmall(usize),
}

impl SessionError {
    /// The text shown to the player in an `error` message.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(_) => "Game not found! Check the code and try again.".into(),
            Self::Full(_) => "This game is already full!".into(),
            Self::CapacityExhausted => {
                "The server has no free game codes right now. Please try again later.".into()
            }
            Self::AlreadyInSession(_) => "You are already in a game.".into(),
            Self::CatalogTooSmall(_) => "The server is misconfigured.".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_matches_join_failures() {
        let code = GameCode::new("123456");
        assert_eq!(
            SessionError::NotFound(code.clone()).user_message(),
            "Game not found! Check the code and try again."
        );
        assert_eq!(
            SessionError::Full(code).user_message(),
            "This game is already full!"
        );
    }

    #[test]
    fn test_display_includes_code() {
        let err = SessionError::Full(GameCode::new("654321"));
        assert_eq!(err.to_string(), "game 654321 is full");
    }
}
