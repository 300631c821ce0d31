//! Error types for the session layer.

use fivestone_board::BoardError;

use crate::config::SessionState;
use crate::player::PlayerId;
use crate::session::SessionId;

/// Errors that can occur during game session operations.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Both seats are taken — no more player slots available.
    #[error("session {0} is full")]
    SessionFull(SessionId),

    /// A seated player already uses this username.
    /// Guests (empty usernames) are exempt.
    #[error("username \"{username}\" is already taken in session {session}")]
    DuplicateIdentity { session: SessionId, username: String },

    /// The game cannot start with fewer than two seated players.
    #[error("session {0} does not have enough players to start")]
    NotEnoughPlayers(SessionId),

    /// The player has no seat in this session.
    #[error("player {player} is not seated in session {session}")]
    UnknownPlayer { session: SessionId, player: PlayerId },

    /// The move came from the player whose turn it is not.
    #[error("it is not player {player}'s turn in session {session}")]
    NotYourTurn { session: SessionId, player: PlayerId },

    /// The session is in a state that doesn't allow this operation.
    /// For example, submitting a move before both players are seated.
    #[error("session {session} is {state}, not running")]
    GameNotRunning {
        session: SessionId,
        state: SessionState,
    },

    /// The placement was rejected by the board.
    #[error(transparent)]
    Board(#[from] BoardError),

    /// Rating can only be recorded once the game has finished.
    #[error("session {0} has not finished")]
    GameNotFinished(SessionId),

    /// Rating can only be recorded for rated sessions.
    #[error("session {0} is not rated")]
    NotRated(SessionId),
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_error_converts_into_game_error() {
        let board_err = BoardError::OutOfBounds {
            row: 20,
            col: 3,
            size: 15,
        };

        let game_err: GameError = board_err.into();

        assert!(matches!(
            game_err,
            GameError::Board(BoardError::OutOfBounds { row: 20, .. })
        ));
    }

    #[test]
    fn test_transparent_board_error_keeps_its_message() {
        let game_err: GameError = BoardError::CellOccupied { row: 7, col: 7 }.into();
        assert_eq!(game_err.to_string(), "cell (7, 7) is already occupied");
    }

    #[test]
    fn test_not_your_turn_message_names_the_player() {
        let err = GameError::NotYourTurn {
            session: SessionId(4),
            player: PlayerId(9),
        };
        assert_eq!(err.to_string(), "it is not player P-9's turn in session G-4");
    }

    #[test]
    fn test_game_not_running_message_names_the_state() {
        let err = GameError::GameNotRunning {
            session: SessionId(2),
            state: SessionState::Waiting,
        };
        assert_eq!(err.to_string(), "session G-2 is Waiting, not running");
    }
}
