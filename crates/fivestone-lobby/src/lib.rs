//! Session ownership and matchmaking for Fivestone.
//!
//! This crate gives each [`GameSession`] a single writer:
//!
//! 1. **Session actors** — one Tokio task per session; all mutation
//!    goes through its command channel ([`SessionHandle`])
//! 2. **The lobby** — creates sessions, matches players into them, and
//!    routes moves ([`Lobby`])
//! 3. **Timeout sweeps** — proactively finishes abandoned sessions
//!    whose lazy clocks have expired ([`Lobby::sweep_timeouts`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Transport Layer (above, external)  ← sockets, auth, persistence
//!     ↕
//! Lobby Layer (this crate)  ← ownership, matchmaking, routing
//!     ↕
//! Session Layer (below)  ← the rules: turns, clocks, verdicts
//! ```
//!
//! [`GameSession`]: fivestone_session::GameSession

mod actor;
mod error;
mod manager;

pub use actor::SessionHandle;
pub use error::LobbyError;
pub use manager::Lobby;
