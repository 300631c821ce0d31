//! Session actor: an isolated Tokio task that owns one game session.
//!
//! Each session runs in its own task, communicating with the outside
//! world through an mpsc channel. This is the "actor model" — no shared
//! mutable state, just message passing. Since the actor processes one
//! command at a time, every game operation is atomic and a snapshot
//! never observes a half-applied move.
//!
//! The actor is also where wall-clock time enters the system: the
//! [`GameSession`] underneath is time-agnostic and takes `now` as an
//! argument, so the actor stamps `Instant::now()` as it dequeues each
//! command.

use std::time::Instant;

use tokio::sync::{mpsc, oneshot};

use fivestone_session::{
    GameConfig, GameError, GameSession, JoinOutcome, MoveOutcome, Player, PlayerId, SessionId,
    SessionSnapshot,
};

use crate::LobbyError;

/// Commands sent to a session actor through its channel.
///
/// Each variant is one operation the outside world can request. The
/// `oneshot::Sender` is a reply channel: the caller sends a command and
/// waits for the response on it.
pub(crate) enum SessionCommand {
    /// Seat a player in the session.
    Join {
        player: Player,
        reply: oneshot::Sender<Result<JoinOutcome, GameError>>,
    },

    /// Submit a move for a seated player.
    Move {
        player: PlayerId,
        row: usize,
        col: usize,
        reply: oneshot::Sender<Result<MoveOutcome, GameError>>,
    },

    /// Report that a player dropped their connection.
    Disconnect {
        player: PlayerId,
        reply: oneshot::Sender<Result<MoveOutcome, GameError>>,
    },

    /// Settle a timeout if one has occurred.
    CheckTimeout {
        reply: oneshot::Sender<MoveOutcome>,
    },

    /// Request a full state snapshot.
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },

    /// Store an externally computed rating adjustment.
    RecordRating {
        delta: i32,
        reply: oneshot::Sender<Result<(), GameError>>,
    },

    /// Shut down the session actor.
    Shutdown,
}

/// Handle to a running session actor. Used to send commands to it.
///
/// Cheap to clone — it's just an `mpsc::Sender` wrapper. The [`Lobby`]
/// holds one of these per session.
///
/// [`Lobby`]: crate::Lobby
#[derive(Clone)]
pub struct SessionHandle {
    session_id: SessionId,
    sender: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    /// Returns the session's unique ID.
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Seats a player, reporting whether the game started.
    pub async fn join(&self, player: Player) -> Result<JoinOutcome, LobbyError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::Join {
                player,
                reply: reply_tx,
            })
            .await
            .map_err(|_| LobbyError::Unavailable(self.session_id))?;
        let outcome = reply_rx
            .await
            .map_err(|_| LobbyError::Unavailable(self.session_id))?;
        Ok(outcome?)
    }

    /// Submits a move for `player`.
    pub async fn submit_move(
        &self,
        player: PlayerId,
        row: usize,
        col: usize,
    ) -> Result<MoveOutcome, LobbyError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::Move {
                player,
                row,
                col,
                reply: reply_tx,
            })
            .await
            .map_err(|_| LobbyError::Unavailable(self.session_id))?;
        let outcome = reply_rx
            .await
            .map_err(|_| LobbyError::Unavailable(self.session_id))?;
        Ok(outcome?)
    }

    /// Reports a dropped connection.
    pub async fn disconnect(&self, player: PlayerId) -> Result<MoveOutcome, LobbyError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::Disconnect {
                player,
                reply: reply_tx,
            })
            .await
            .map_err(|_| LobbyError::Unavailable(self.session_id))?;
        let outcome = reply_rx
            .await
            .map_err(|_| LobbyError::Unavailable(self.session_id))?;
        Ok(outcome?)
    }

    /// Settles a timeout if one has occurred.
    pub async fn check_timeout(&self) -> Result<MoveOutcome, LobbyError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::CheckTimeout { reply: reply_tx })
            .await
            .map_err(|_| LobbyError::Unavailable(self.session_id))?;
        reply_rx
            .await
            .map_err(|_| LobbyError::Unavailable(self.session_id))
    }

    /// Requests a full state snapshot.
    pub async fn snapshot(&self) -> Result<SessionSnapshot, LobbyError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::Snapshot { reply: reply_tx })
            .await
            .map_err(|_| LobbyError::Unavailable(self.session_id))?;
        reply_rx
            .await
            .map_err(|_| LobbyError::Unavailable(self.session_id))
    }

    /// Stores an externally computed rating adjustment.
    pub async fn record_rating(&self, delta: i32) -> Result<(), LobbyError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::RecordRating {
                delta,
                reply: reply_tx,
            })
            .await
            .map_err(|_| LobbyError::Unavailable(self.session_id))?;
        let result = reply_rx
            .await
            .map_err(|_| LobbyError::Unavailable(self.session_id))?;
        Ok(result?)
    }

    /// Tells the session actor to shut down.
    pub async fn shutdown(&self) -> Result<(), LobbyError> {
        self.sender
            .send(SessionCommand::Shutdown)
            .await
            .map_err(|_| LobbyError::Unavailable(self.session_id))
    }
}

/// The internal session actor state. Runs inside a Tokio task.
struct SessionActor {
    session: GameSession,
    receiver: mpsc::Receiver<SessionCommand>,
}

impl SessionActor {
    /// Runs the actor loop, processing commands until shutdown.
    async fn run(mut self) {
        tracing::info!(session_id = %self.session.id(), "session actor started");

        while let Some(cmd) = self.receiver.recv().await {
            let now = Instant::now();
            match cmd {
                SessionCommand::Join { player, reply } => {
                    let _ = reply.send(self.session.add_player(player, now));
                }
                SessionCommand::Move {
                    player,
                    row,
                    col,
                    reply,
                } => {
                    let _ = reply.send(self.session.submit_move(player, row, col, now));
                }
                SessionCommand::Disconnect { player, reply } => {
                    let _ = reply.send(self.session.notify_disconnect(player, now));
                }
                SessionCommand::CheckTimeout { reply } => {
                    let _ = reply.send(self.session.check_timeout(now));
                }
                SessionCommand::Snapshot { reply } => {
                    let _ = reply.send(self.session.snapshot());
                }
                SessionCommand::RecordRating { delta, reply } => {
                    let _ = reply.send(self.session.record_rating_delta(delta));
                }
                SessionCommand::Shutdown => {
                    tracing::info!(session_id = %self.session.id(), "session shutting down");
                    break;
                }
            }
        }

        tracing::info!(session_id = %self.session.id(), "session actor stopped");
    }
}

/// Spawns a new session actor task and returns a handle to it.
///
/// `channel_size` controls backpressure — if the channel fills up,
/// senders will wait (bounded channel).
pub(crate) fn spawn_session(
    session_id: SessionId,
    config: GameConfig,
    channel_size: usize,
) -> SessionHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = SessionActor {
        session: GameSession::new(session_id, config),
        receiver: rx,
    };

    tokio::spawn(actor.run());

    SessionHandle {
        session_id,
        sender: tx,
    }
}
