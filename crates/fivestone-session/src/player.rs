//! Player identity and seating.
//!
//! A [`Player`] is who someone is; a [`Seat`] is that player's place in
//! one particular session, with the per-session state (clock, connection)
//! attached. The same player could in principle sit in many sessions,
//! which is why the clock lives on the seat and not on the player.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// A unique identifier for a player.
///
/// A newtype wrapper around `u64`: you can't accidentally pass a
/// `SessionId` where a `PlayerId` is expected, even though both are
/// `u64` underneath.
///
/// `#[serde(transparent)]` makes PlayerId(42) serialize as just `42`,
/// not `{ "0": 42 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// Who a player is, independent of any session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// The player's unique ID.
    pub id: PlayerId,
    /// Display name. Empty for guests.
    pub username: String,
    /// Whether this player has a real account. Guests play anonymously.
    pub logged: bool,
}

impl Player {
    /// Creates a logged-in player with the given username.
    pub fn new(id: PlayerId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            logged: true,
        }
    }

    /// Creates an anonymous guest. Guests have no username, which also
    /// exempts them from the duplicate-name check when joining.
    pub fn guest(id: PlayerId) -> Self {
        Self {
            id,
            username: String::new(),
            logged: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Seat
// ---------------------------------------------------------------------------

/// A player's place in one session.
///
/// The seat carries everything session-local about the player: how much
/// clock time they have left and whether they are still connected. The
/// clock is charged lazily — `remaining` is only reduced when the
/// session settles a turn, so between settlements it reads as the value
/// at the last settlement, not the live value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    /// The player occupying this seat.
    pub player: Player,
    /// Clock time left, as of the last settlement.
    pub remaining: Duration,
    /// Whether the player is still connected.
    pub connected: bool,
}

impl Seat {
    pub(crate) fn new(player: Player, time_limit: Duration) -> Self {
        Self {
            player,
            remaining: time_limit,
            connected: true,
        }
    }

    /// The seated player's ID.
    pub fn id(&self) -> PlayerId {
        self.player.id
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&PlayerId(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_player_id_display() {
        assert_eq!(PlayerId(7).to_string(), "P-7");
    }

    #[test]
    fn test_new_player_is_logged() {
        let player = Player::new(PlayerId(1), "alice");
        assert_eq!(player.username, "alice");
        assert!(player.logged);
    }

    #[test]
    fn test_guest_has_no_username() {
        let guest = Player::guest(PlayerId(2));
        assert!(guest.username.is_empty());
        assert!(!guest.logged);
    }

    #[test]
    fn test_seat_starts_connected_with_full_clock() {
        let seat = Seat::new(Player::new(PlayerId(3), "bob"), Duration::from_secs(120));
        assert_eq!(seat.id(), PlayerId(3));
        assert_eq!(seat.remaining, Duration::from_secs(120));
        assert!(seat.connected);
    }
}
