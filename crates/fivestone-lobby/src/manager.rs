//! Lobby: creates, tracks, and routes players to game sessions.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use fivestone_session::{
    GameConfig, GameError, JoinOutcome, MoveOutcome, Player, PlayerId, SessionId, SessionSnapshot,
    Verdict, WinCondition,
};

use crate::actor::spawn_session;
use crate::{LobbyError, SessionHandle};

/// Counter for generating unique session IDs.
static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Default command channel size for session actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Manages all active sessions and tracks which player sits where.
///
/// This is the entry point for game operations from higher layers
/// (a connection handler, a matchmaking endpoint, a test driver).
pub struct Lobby {
    /// Active sessions, keyed by session ID.
    sessions: HashMap<SessionId, SessionHandle>,

    /// Maps each player to the session they're currently in.
    /// A player can be in at most ONE session at a time (key invariant).
    player_sessions: HashMap<PlayerId, SessionId>,
}

impl Lobby {
    /// Creates a new, empty lobby.
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
            player_sessions: HashMap::new(),
        }
    }

    /// Creates a new session and returns its ID.
    pub fn create_session(&mut self, config: GameConfig) -> SessionId {
        let session_id = SessionId(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed));
        let kind = config.kind;
        let handle = spawn_session(session_id, config, DEFAULT_CHANNEL_SIZE);
        self.sessions.insert(session_id, handle);
        tracing::info!(%session_id, %kind, "session created");
        session_id
    }

    /// Seats a player in a specific session.
    ///
    /// Enforces the "one session at a time" invariant.
    pub async fn join(
        &mut self,
        player: Player,
        session_id: SessionId,
    ) -> Result<JoinOutcome, LobbyError> {
        let player_id = player.id;
        if let Some(current) = self.player_sessions.get(&player_id) {
            return Err(LobbyError::AlreadyInSession(player_id, *current));
        }

        let handle = self
            .sessions
            .get(&session_id)
            .ok_or(LobbyError::NotFound(session_id))?;

        let outcome = handle.join(player).await?;
        self.player_sessions.insert(player_id, session_id);
        Ok(outcome)
    }

    /// Finds a waiting session of the same kind or creates a new one,
    /// then seats the player.
    ///
    /// This is the whole matchmaking policy: first two arrivals of a
    /// kind fill a session. Kinds never mix — a Quick player is never
    /// seated into a Ranked game.
    pub async fn join_or_create(
        &mut self,
        player: Player,
        config: GameConfig,
    ) -> Result<(SessionId, JoinOutcome), LobbyError> {
        let player_id = player.id;
        if let Some(current) = self.player_sessions.get(&player_id) {
            return Err(LobbyError::AlreadyInSession(player_id, *current));
        }

        // Try to find a waiting session of the right kind. If join()
        // fails due to a race (session filled between snapshot and
        // join), keep searching.
        for handle in self.sessions.values() {
            let Ok(snapshot) = handle.snapshot().await else {
                continue;
            };
            if snapshot.kind != config.kind
                || !snapshot.state.is_joinable()
                || snapshot.seats.len() >= 2
            {
                continue;
            }
            if let Ok(outcome) = handle.join(player.clone()).await {
                self.player_sessions.insert(player_id, snapshot.id);
                return Ok((snapshot.id, outcome));
            }
        }

        // No waiting session found: create one.
        let session_id = self.create_session(config);
        let handle = self
            .sessions
            .get(&session_id)
            .expect("just created this session");
        let outcome = handle.join(player).await?;
        self.player_sessions.insert(player_id, session_id);
        Ok((session_id, outcome))
    }

    /// Routes a move from a player to their current session.
    pub async fn submit_move(
        &self,
        player: PlayerId,
        row: usize,
        col: usize,
    ) -> Result<MoveOutcome, LobbyError> {
        let session_id = self
            .player_sessions
            .get(&player)
            .ok_or(LobbyError::NotInSession(player))?;

        let handle = self
            .sessions
            .get(session_id)
            .ok_or(LobbyError::NotFound(*session_id))?;

        handle.submit_move(player, row, col).await
    }

    /// Reports that a player dropped their connection.
    ///
    /// On a running session the opponent wins and the verdict is
    /// returned. A disconnect from a still-waiting session has no
    /// opponent to award, so the session itself is torn down and `None`
    /// comes back. Either way the player's lobby index entry is
    /// released.
    pub async fn disconnect(&mut self, player: PlayerId) -> Result<Option<Verdict>, LobbyError> {
        let session_id = self
            .player_sessions
            .get(&player)
            .copied()
            .ok_or(LobbyError::NotInSession(player))?;

        let result = {
            let handle = self
                .sessions
                .get(&session_id)
                .ok_or(LobbyError::NotFound(session_id))?;
            handle.disconnect(player).await
        };

        match result {
            Ok(outcome) => {
                self.player_sessions.remove(&player);
                Ok(outcome.verdict)
            }
            Err(LobbyError::Game(GameError::GameNotRunning { .. })) => {
                // Waiting session: the lone occupant left.
                self.destroy_session(session_id).await?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Returns a full snapshot of a specific session.
    pub async fn snapshot(&self, session_id: SessionId) -> Result<SessionSnapshot, LobbyError> {
        let handle = self
            .sessions
            .get(&session_id)
            .ok_or(LobbyError::NotFound(session_id))?;
        handle.snapshot().await
    }

    /// Returns the session a player is currently in, if any.
    pub fn session_of(&self, player: PlayerId) -> Option<SessionId> {
        self.player_sessions.get(&player).copied()
    }

    /// Stores an externally computed rating adjustment on a session.
    pub async fn record_rating(
        &self,
        session_id: SessionId,
        delta: i32,
    ) -> Result<(), LobbyError> {
        let handle = self
            .sessions
            .get(&session_id)
            .ok_or(LobbyError::NotFound(session_id))?;
        handle.record_rating(delta).await
    }

    /// Polls every running session for an expired clock and finishes
    /// the ones that have flagged.
    ///
    /// Clocks are lazy, so an abandoned session would otherwise sit
    /// Running forever. An external scheduler calls this periodically;
    /// the returned pairs are the sessions this sweep ended.
    pub async fn sweep_timeouts(&self) -> Vec<(SessionId, Verdict)> {
        let mut expired = Vec::new();
        for handle in self.sessions.values() {
            let Ok(snapshot) = handle.snapshot().await else {
                continue;
            };
            if !snapshot.state.is_active() {
                continue;
            }
            let Ok(outcome) = handle.check_timeout().await else {
                continue;
            };
            // A session can finish between the snapshot and the poll;
            // only report the ones this sweep actually timed out.
            if let Some(verdict) = outcome.verdict {
                if verdict.condition == WinCondition::Time {
                    expired.push((snapshot.id, verdict));
                }
            }
        }
        if !expired.is_empty() {
            tracing::info!(count = expired.len(), "sweep finished expired sessions");
        }
        expired
    }

    /// Shuts down a session and removes all its players from the index.
    pub async fn destroy_session(&mut self, session_id: SessionId) -> Result<(), LobbyError> {
        let handle = self
            .sessions
            .remove(&session_id)
            .ok_or(LobbyError::NotFound(session_id))?;

        let _ = handle.shutdown().await;

        self.player_sessions.retain(|_, sid| *sid != session_id);

        tracing::info!(%session_id, "session destroyed");
        Ok(())
    }

    /// Returns the number of active sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Lists all active session IDs.
    pub fn session_ids(&self) -> Vec<SessionId> {
        self.sessions.keys().copied().collect()
    }
}

impl Default for Lobby {
    fn default() -> Self {
        Self::new()
    }
}
