//! Game session state machine for Fivestone.
//!
//! This crate owns everything that happens between two players sitting
//! down and a verdict being reached:
//!
//! 1. **Seating** — collecting two players into a session ([`GameSession::add_player`])
//! 2. **Turn sequencing** — whose move it is, and what lands on the board
//! 3. **Clocks** — per-player countdown time, charged lazily ([`clock`])
//! 4. **Verdicts** — win by run, by time, or by disconnect ([`Verdict`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Lobby Layer (above)  ← routes players to sessions, drives timeout sweeps
//!     ↕
//! Session Layer (this crate)  ← the rules: turns, clocks, verdicts
//!     ↕
//! Board Layer (below)  ← provides Board, Stone, run detection
//! ```

mod clock;
mod config;
mod error;
mod player;
mod session;

pub use clock::{charge, ClockCharge};
pub use config::{GameConfig, GameKind, Opening, SessionState};
pub use error::GameError;
pub use player::{Player, PlayerId, Seat};
pub use session::{
    GameSession, JoinOutcome, MoveOutcome, SessionId, SessionSnapshot, Verdict, WinCondition,
};
