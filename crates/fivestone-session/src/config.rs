//! Game configuration, variants, and the session state machine.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

// ---------------------------------------------------------------------------
// GameKind
// ---------------------------------------------------------------------------

/// The variant a session plays.
///
/// The kind fixes the policy knobs: a Quick game always gets the quick
/// clock, a Ranked game always gets the ranked clock plus a rating
/// delta slot, and only Custom exposes the raw configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    /// Casual game on standard rules with a short clock.
    Quick,
    /// Competitive game: longer clock, and the result carries a rating
    /// adjustment.
    Ranked,
    /// Anything goes: board size, run length, clock, and opening are
    /// whatever the creator asked for.
    Custom,
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quick => write!(f, "Quick"),
            Self::Ranked => write!(f, "Ranked"),
            Self::Custom => write!(f, "Custom"),
        }
    }
}

// ---------------------------------------------------------------------------
// Opening
// ---------------------------------------------------------------------------

/// The opening protocol for a session.
///
/// Recorded on the session and surfaced in snapshots so clients can
/// display it; the engine itself does not referee swap negotiations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Opening {
    /// Free opening: the starting player moves anywhere.
    #[default]
    Standard,
    /// After the first move the second player may swap colours.
    Swap,
    /// Tournament opening: three stones down, then a swap menu.
    Swap2,
}

impl fmt::Display for Opening {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "Standard"),
            Self::Swap => write!(f, "Swap"),
            Self::Swap2 => write!(f, "Swap2"),
        }
    }
}

// ---------------------------------------------------------------------------
// GameConfig
// ---------------------------------------------------------------------------

/// Full configuration for one session.
///
/// Built through [`GameConfig::quick`], [`GameConfig::ranked`], or
/// [`GameConfig::custom`] rather than struct literals, so the kind and
/// its policy knobs stay consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Which variant this session plays.
    pub kind: GameKind,
    /// Side length of the board.
    pub board_size: usize,
    /// Stones in a row needed to win.
    pub win_length: usize,
    /// Each player's total clock budget for the whole game.
    pub time_limit: Duration,
    /// Opening protocol, recorded for clients.
    pub opening: Opening,
    /// Whether the result adjusts ratings.
    pub rated: bool,
}

impl GameConfig {
    /// Standard board side length.
    pub const DEFAULT_BOARD_SIZE: usize = 15;
    /// Standard winning run length.
    pub const DEFAULT_WIN_LENGTH: usize = 5;
    /// Largest board a custom game may ask for.
    pub const MAX_BOARD_SIZE: usize = 64;
    /// Per-player clock for quick games.
    pub const QUICK_TIME_LIMIT: Duration = Duration::from_secs(120);
    /// Per-player clock for ranked games.
    pub const RANKED_TIME_LIMIT: Duration = Duration::from_secs(180);

    /// A quick game: standard rules, 120 second clock, unrated.
    pub fn quick() -> Self {
        Self {
            kind: GameKind::Quick,
            board_size: Self::DEFAULT_BOARD_SIZE,
            win_length: Self::DEFAULT_WIN_LENGTH,
            time_limit: Self::QUICK_TIME_LIMIT,
            opening: Opening::Standard,
            rated: false,
        }
    }

    /// A ranked game: standard rules, 180 second clock, rated.
    pub fn ranked() -> Self {
        Self {
            kind: GameKind::Ranked,
            time_limit: Self::RANKED_TIME_LIMIT,
            rated: true,
            ..Self::quick()
        }
    }

    /// A custom game with the caller's rules, unrated.
    pub fn custom(
        board_size: usize,
        win_length: usize,
        time_limit: Duration,
        opening: Opening,
    ) -> Self {
        Self {
            kind: GameKind::Custom,
            board_size,
            win_length,
            time_limit,
            opening,
            rated: false,
        }
    }

    /// Clamp and fix any out-of-range values so the config is safe to use.
    ///
    /// Called automatically when a session is created. Rules:
    /// - `board_size` of 0 falls back to [`Self::DEFAULT_BOARD_SIZE`],
    ///   and is capped to [`Self::MAX_BOARD_SIZE`].
    /// - `win_length` of 0 falls back to [`Self::DEFAULT_WIN_LENGTH`],
    ///   and is capped to `board_size` (a run longer than the board can
    ///   never be completed).
    /// - A zero `time_limit` is allowed: it means every clock check
    ///   flags immediately, which tests rely on.
    pub fn validated(mut self) -> Self {
        if self.board_size == 0 {
            warn!(
                default = Self::DEFAULT_BOARD_SIZE,
                "board_size is zero, using default"
            );
            self.board_size = Self::DEFAULT_BOARD_SIZE;
        }
        if self.board_size > Self::MAX_BOARD_SIZE {
            warn!(
                size = self.board_size,
                max = Self::MAX_BOARD_SIZE,
                "board_size exceeds maximum, clamping"
            );
            self.board_size = Self::MAX_BOARD_SIZE;
        }
        if self.win_length == 0 {
            warn!(
                default = Self::DEFAULT_WIN_LENGTH,
                "win_length is zero, using default"
            );
            self.win_length = Self::DEFAULT_WIN_LENGTH;
        }
        if self.win_length > self.board_size {
            warn!(
                win_length = self.win_length,
                board_size = self.board_size,
                "win_length exceeds board size, clamping"
            );
            self.win_length = self.board_size;
        }
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::quick()
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// The lifecycle state of a session.
///
/// Transitions are strictly ordered — no skipping states:
///
/// ```text
/// Waiting → Running → Finished
/// ```
///
/// - **Waiting**: The session exists and is accepting players. The
///   clock has not started.
/// - **Running**: Both seats are filled and the game is live. Moves
///   are accepted and clocks count down.
/// - **Finished**: A verdict has been reached. The board and clocks
///   are frozen; only reads (and rating recording) are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Waiting,
    Running,
    Finished,
}

impl SessionState {
    /// Returns `true` if the session is accepting new players.
    pub fn is_joinable(&self) -> bool {
        matches!(self, Self::Waiting)
    }

    /// Returns `true` if the game is live: moves land and clocks run.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Returns `true` if a verdict has been reached.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }

    /// Attempts to transition to the next state.
    ///
    /// Returns `Some(next)` if the transition is valid, `None` if not.
    /// This enforces the strict ordering of the state machine.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Waiting => Some(Self::Running),
            Self::Running => Some(Self::Finished),
            Self::Finished => None,
        }
    }

    /// Returns `true` if transitioning to `target` is valid.
    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Waiting => write!(f, "Waiting"),
            Self::Running => write!(f, "Running"),
            Self::Finished => write!(f, "Finished"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_state_next_follows_strict_order() {
        assert_eq!(SessionState::Waiting.next(), Some(SessionState::Running));
        assert_eq!(SessionState::Running.next(), Some(SessionState::Finished));
        assert_eq!(SessionState::Finished.next(), None);
    }

    #[test]
    fn test_session_state_can_transition_to() {
        assert!(SessionState::Waiting.can_transition_to(SessionState::Running));
        assert!(!SessionState::Waiting.can_transition_to(SessionState::Finished));
        assert!(!SessionState::Finished.can_transition_to(SessionState::Waiting));
        assert!(!SessionState::Running.can_transition_to(SessionState::Waiting));
    }

    #[test]
    fn test_session_state_is_joinable() {
        assert!(SessionState::Waiting.is_joinable());
        assert!(!SessionState::Running.is_joinable());
        assert!(!SessionState::Finished.is_joinable());
    }

    #[test]
    fn test_session_state_is_active() {
        assert!(!SessionState::Waiting.is_active());
        assert!(SessionState::Running.is_active());
        assert!(!SessionState::Finished.is_active());
    }

    #[test]
    fn test_session_state_display() {
        assert_eq!(SessionState::Waiting.to_string(), "Waiting");
        assert_eq!(SessionState::Running.to_string(), "Running");
        assert_eq!(SessionState::Finished.to_string(), "Finished");
    }

    #[test]
    fn test_quick_config_defaults() {
        let config = GameConfig::quick();
        assert_eq!(config.kind, GameKind::Quick);
        assert_eq!(config.board_size, 15);
        assert_eq!(config.win_length, 5);
        assert_eq!(config.time_limit, Duration::from_secs(120));
        assert_eq!(config.opening, Opening::Standard);
        assert!(!config.rated);
    }

    #[test]
    fn test_ranked_config_gets_longer_clock_and_rating() {
        let config = GameConfig::ranked();
        assert_eq!(config.kind, GameKind::Ranked);
        assert_eq!(config.board_size, 15);
        assert_eq!(config.time_limit, Duration::from_secs(180));
        assert!(config.rated);
    }

    #[test]
    fn test_custom_config_keeps_caller_values() {
        let config = GameConfig::custom(19, 6, Duration::from_secs(300), Opening::Swap2);
        assert_eq!(config.kind, GameKind::Custom);
        assert_eq!(config.board_size, 19);
        assert_eq!(config.win_length, 6);
        assert_eq!(config.time_limit, Duration::from_secs(300));
        assert_eq!(config.opening, Opening::Swap2);
        assert!(!config.rated);
    }

    #[test]
    fn test_validated_fixes_zero_board_size() {
        let config = GameConfig::custom(0, 5, Duration::from_secs(60), Opening::Standard);
        let config = config.validated();
        assert_eq!(config.board_size, GameConfig::DEFAULT_BOARD_SIZE);
    }

    #[test]
    fn test_validated_caps_board_size() {
        let config = GameConfig::custom(1000, 5, Duration::from_secs(60), Opening::Standard);
        let config = config.validated();
        assert_eq!(config.board_size, GameConfig::MAX_BOARD_SIZE);
    }

    #[test]
    fn test_validated_fixes_zero_win_length() {
        let config = GameConfig::custom(15, 0, Duration::from_secs(60), Opening::Standard);
        let config = config.validated();
        assert_eq!(config.win_length, GameConfig::DEFAULT_WIN_LENGTH);
    }

    #[test]
    fn test_validated_clamps_win_length_to_board() {
        let config = GameConfig::custom(9, 12, Duration::from_secs(60), Opening::Standard);
        let config = config.validated();
        assert_eq!(config.win_length, 9);
    }

    #[test]
    fn test_validated_allows_zero_time_limit() {
        let config = GameConfig::custom(15, 5, Duration::ZERO, Opening::Standard);
        let config = config.validated();
        assert_eq!(config.time_limit, Duration::ZERO);
    }

    #[test]
    fn test_default_config_is_quick() {
        assert_eq!(GameConfig::default(), GameConfig::quick());
    }
}
