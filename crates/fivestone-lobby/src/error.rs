//! Error types for the lobby layer.

use fivestone_session::{GameError, PlayerId, SessionId};

/// Errors that can occur during lobby operations.
#[derive(Debug, thiserror::Error)]
pub enum LobbyError {
    /// The session does not exist.
    #[error("session {0} not found")]
    NotFound(SessionId),

    /// The player is already in a session. A player can be in at most
    /// one session at a time.
    #[error("player {0} is already in session {1}")]
    AlreadyInSession(PlayerId, SessionId),

    /// The player is not in any session.
    #[error("player {0} is not in any session")]
    NotInSession(PlayerId),

    /// The session's command channel is full or closed.
    #[error("session {0} is unavailable")]
    Unavailable(SessionId),

    /// The game itself rejected the operation.
    #[error(transparent)]
    Game(#[from] GameError),
}
