//! The game session state machine.
//!
//! A [`GameSession`] owns one game: the board, both seats, the turn
//! counter, and the clock calibration point. It is a pure synchronous
//! state machine; every operation takes the caller's `now`, and no
//! internal timers exist. The lobby layer wraps a session in an actor
//! task to give it a single writer.

use std::fmt;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use fivestone_board::{has_run, Board, Stone};

use crate::clock::{charge, ClockCharge};
use crate::config::{GameConfig, GameKind, Opening, SessionState};
use crate::error::GameError;
use crate::player::{Player, PlayerId, Seat};

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// A unique identifier for a game session.
///
/// Same newtype pattern as [`PlayerId`]: a `u64` with its own type so
/// the two kinds of id can't be mixed up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinCondition {
    /// A winning run was completed on the board. Also used for the
    /// draw that occurs when the board fills with no run.
    Combination,
    /// The loser's clock ran out.
    Time,
    /// The loser dropped their connection.
    Disconnect,
}

impl fmt::Display for WinCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Combination => write!(f, "combination"),
            Self::Time => write!(f, "time"),
            Self::Disconnect => write!(f, "disconnect"),
        }
    }
}

/// The recorded result of a finished game.
///
/// Written exactly once, on the transition into
/// [`SessionState::Finished`]. `winner` is `None` for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub winner: Option<PlayerId>,
    pub condition: WinCondition,
}

/// What happened when a player was seated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Seated; the session is still waiting for an opponent.
    Waiting,
    /// Seated, and the second seat filled: the game started and the
    /// coin flip picked `starting` to move first, playing Black.
    Started { starting: PlayerId },
}

/// The result of a game-advancing call.
///
/// Returned by [`GameSession::submit_move`],
/// [`GameSession::notify_disconnect`], and
/// [`GameSession::check_timeout`]. `placed` says whether a stone
/// landed; `verdict` mirrors the session's verdict after the call, so
/// it is `Some` exactly when the session is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Whether a stone was placed on the board.
    pub placed: bool,
    /// The round counter after the call.
    pub round: u32,
    /// The terminal result, once the session is finished.
    pub verdict: Option<Verdict>,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// A read-only copy of everything a client needs to render the game.
///
/// Serde-serializable; how it travels (JSON over a socket, a log line,
/// a test assertion) is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub kind: GameKind,
    pub opening: Opening,
    pub state: SessionState,
    pub round: u32,
    pub board: Board,
    pub seats: Vec<Seat>,
    pub turns: Vec<(usize, usize)>,
    pub to_move: Option<PlayerId>,
    pub verdict: Option<Verdict>,
    pub rating_delta: Option<i32>,
}

// ---------------------------------------------------------------------------
// GameSession
// ---------------------------------------------------------------------------

/// One two-player game, from seating through to a verdict.
#[derive(Debug)]
pub struct GameSession {
    id: SessionId,
    config: GameConfig,
    state: SessionState,
    board: Board,
    /// Seats in join order. At most two.
    seats: Vec<Seat>,
    /// Index of the seat that moves first and plays Black. Set by the
    /// coin flip on start.
    starting: Option<usize>,
    /// Accepted move count. Always equals `turns.len()`.
    round: u32,
    turns: Vec<(usize, usize)>,
    /// When the current mover's turn began. `Some` iff Running.
    calibration: Option<Instant>,
    verdict: Option<Verdict>,
    /// Externally computed rating adjustment. Rated sessions carry
    /// `Some(0)` from creation; unrated sessions stay `None`.
    rating_delta: Option<i32>,
    rng: StdRng,
}

impl GameSession {
    /// Creates a session with an OS-seeded starting-player coin.
    pub fn new(id: SessionId, config: GameConfig) -> Self {
        Self::with_rng(id, config, StdRng::from_os_rng())
    }

    /// Creates a session with a caller-supplied RNG.
    ///
    /// Tests seed the RNG to make the starting-player coin flip
    /// deterministic.
    pub fn with_rng(id: SessionId, config: GameConfig, rng: StdRng) -> Self {
        let config = config.validated();
        Self {
            id,
            state: SessionState::Waiting,
            board: Board::new(config.board_size),
            seats: Vec::with_capacity(2),
            starting: None,
            round: 0,
            turns: Vec::new(),
            calibration: None,
            verdict: None,
            rating_delta: if config.rated { Some(0) } else { None },
            config,
            rng,
        }
    }

    // -- Read accessors --

    /// The session's unique ID.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The validated configuration this session runs under.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The seats, in join order.
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Accepted moves in order.
    pub fn turns(&self) -> &[(usize, usize)] {
        &self.turns
    }

    /// The number of accepted moves.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// The recorded result, once finished.
    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    /// The recorded rating adjustment, for rated sessions.
    pub fn rating_delta(&self) -> Option<i32> {
        self.rating_delta
    }

    /// Returns `true` if both seats are occupied.
    pub fn is_full(&self) -> bool {
        self.seats.len() >= 2
    }

    /// The player expected to move next, while the game is running.
    pub fn to_move(&self) -> Option<PlayerId> {
        if !self.state.is_active() {
            return None;
        }
        self.mover_index().map(|idx| self.seats[idx].id())
    }

    /// Seat index of the expected mover: the starting seat on even
    /// rounds, the other seat on odd rounds.
    fn mover_index(&self) -> Option<usize> {
        self.starting.map(|s| (s + self.round as usize) % 2)
    }

    /// The stone colour a seat plays. The starting seat plays Black.
    fn stone_of(&self, seat_idx: usize) -> Stone {
        if Some(seat_idx) == self.starting {
            Stone::Black
        } else {
            Stone::White
        }
    }

    fn seat_index(&self, player: PlayerId) -> Option<usize> {
        self.seats.iter().position(|seat| seat.id() == player)
    }

    // -- Seating --

    /// Seats a player. When the second seat fills, the session starts:
    /// the coin is flipped, the clock is armed, and the outcome reports
    /// who moves first.
    ///
    /// # Errors
    /// - [`GameError::SessionFull`] if both seats are already taken,
    ///   which also covers any join after the game started or finished.
    /// - [`GameError::DuplicateIdentity`] if a seated player already
    ///   uses the joining player's non-empty username.
    pub fn add_player(&mut self, player: Player, now: Instant) -> Result<JoinOutcome, GameError> {
        if self.is_full() {
            return Err(GameError::SessionFull(self.id));
        }
        if !player.username.is_empty()
            && self
                .seats
                .iter()
                .any(|seat| seat.player.username == player.username)
        {
            return Err(GameError::DuplicateIdentity {
                session: self.id,
                username: player.username,
            });
        }

        tracing::info!(session_id = %self.id, player_id = %player.id, "player joined");
        self.seats.push(Seat::new(player, self.config.time_limit));

        if self.is_full() {
            let starting = self.start(now)?;
            Ok(JoinOutcome::Started { starting })
        } else {
            Ok(JoinOutcome::Waiting)
        }
    }

    /// Waiting → Running: flips the starting-player coin and arms the
    /// clock calibration point.
    fn start(&mut self, now: Instant) -> Result<PlayerId, GameError> {
        if self.seats.len() < 2 {
            return Err(GameError::NotEnoughPlayers(self.id));
        }
        debug_assert!(self.state.can_transition_to(SessionState::Running));

        let starting = self.rng.random_range(0..2);
        self.starting = Some(starting);
        self.state = SessionState::Running;
        self.calibration = Some(now);

        let starter = self.seats[starting].id();
        tracing::info!(
            session_id = %self.id,
            starting = %starter,
            time_limit_secs = self.config.time_limit.as_secs(),
            "game started"
        );
        Ok(starter)
    }

    // -- Moves --

    /// Submits a move for `player` at `(row, col)`.
    ///
    /// The mover's clock is consulted first: if the time spent since
    /// the last calibration meets or exceeds their remaining budget,
    /// the session finishes with a Time verdict for the opponent and
    /// the move is reported back unplaced. That path returns `Ok`, not
    /// an error, because the game legitimately advanced. Otherwise the
    /// placement is attempted; a rejected placement leaves clocks and
    /// the calibration point untouched, so time keeps accruing against
    /// the mover.
    ///
    /// # Errors
    /// - [`GameError::GameNotRunning`] unless the state is Running.
    /// - [`GameError::UnknownPlayer`] if `player` has no seat here.
    /// - [`GameError::NotYourTurn`] if it is the other seat's turn.
    /// - [`GameError::Board`] if the cell is out of bounds or occupied.
    pub fn submit_move(
        &mut self,
        player: PlayerId,
        row: usize,
        col: usize,
        now: Instant,
    ) -> Result<MoveOutcome, GameError> {
        if !self.state.is_active() {
            return Err(GameError::GameNotRunning {
                session: self.id,
                state: self.state,
            });
        }
        let seat_idx = self.seat_index(player).ok_or(GameError::UnknownPlayer {
            session: self.id,
            player,
        })?;
        let mover = self
            .mover_index()
            .expect("running session has a starting seat");
        if seat_idx != mover {
            return Err(GameError::NotYourTurn {
                session: self.id,
                player,
            });
        }

        let calibration = self
            .calibration
            .expect("running session has a calibration point");
        let spent = match charge(self.seats[mover].remaining, calibration, now) {
            ClockCharge::Exhausted => {
                self.seats[mover].remaining = Duration::ZERO;
                let winner = self.seats[1 - mover].id();
                self.finish(Some(winner), WinCondition::Time);
                return Ok(self.outcome(false));
            }
            ClockCharge::Spent(spent) => spent,
        };

        let stone = self.stone_of(mover);
        self.board.place(row, col, stone)?;

        self.seats[mover].remaining -= spent;
        self.calibration = Some(now);
        self.turns.push((row, col));
        self.round += 1;
        debug_assert_eq!(self.turns.len(), self.round as usize);

        if has_run(&self.board, row, col, stone, self.config.win_length) {
            self.finish(Some(player), WinCondition::Combination);
        } else if self.board.is_full() {
            // Board exhausted with no run anywhere: a draw.
            self.finish(None, WinCondition::Combination);
        }
        Ok(self.outcome(true))
    }

    // -- Terminal paths --

    /// Reports that `player` dropped their connection.
    ///
    /// On a running session the remaining player wins by disconnect.
    /// The active clock is settled first so the final seats carry
    /// accurate remaining times. On an already-finished session this is
    /// a no-op reporting the existing verdict.
    ///
    /// # Errors
    /// - [`GameError::UnknownPlayer`] if `player` has no seat here.
    /// - [`GameError::GameNotRunning`] while the session is still
    ///   waiting for players; a waiting session has no opponent to
    ///   award a win to, so the caller tears it down instead.
    pub fn notify_disconnect(
        &mut self,
        player: PlayerId,
        now: Instant,
    ) -> Result<MoveOutcome, GameError> {
        let seat_idx = self.seat_index(player).ok_or(GameError::UnknownPlayer {
            session: self.id,
            player,
        })?;
        match self.state {
            SessionState::Waiting => Err(GameError::GameNotRunning {
                session: self.id,
                state: self.state,
            }),
            SessionState::Finished => Ok(self.outcome(false)),
            SessionState::Running => {
                self.settle_active_clock(now);
                self.seats[seat_idx].connected = false;
                let winner = self.seats[1 - seat_idx].id();
                tracing::warn!(
                    session_id = %self.id,
                    player_id = %player,
                    "player disconnected mid-game"
                );
                self.finish(Some(winner), WinCondition::Disconnect);
                Ok(self.outcome(false))
            }
        }
    }

    /// Settles a timeout if one has occurred.
    ///
    /// The lazy clock only falls when someone looks at it: this is the
    /// explicit poll for sessions nobody is moving in. Total and
    /// idempotent. A session that is waiting, healthy, or already
    /// finished just reports its current round and verdict.
    pub fn check_timeout(&mut self, now: Instant) -> MoveOutcome {
        if self.timed_out(now) {
            let mover = self
                .mover_index()
                .expect("running session has a starting seat");
            self.seats[mover].remaining = Duration::ZERO;
            let winner = self.seats[1 - mover].id();
            self.finish(Some(winner), WinCondition::Time);
        }
        self.outcome(false)
    }

    /// Returns `true` if the current mover's clock is exhausted at
    /// `now`. Pure query: nothing is settled or finished. Always
    /// `false` outside Running.
    pub fn timed_out(&self, now: Instant) -> bool {
        if !self.state.is_active() {
            return false;
        }
        let Some(mover) = self.mover_index() else {
            return false;
        };
        let Some(calibration) = self.calibration else {
            return false;
        };
        matches!(
            charge(self.seats[mover].remaining, calibration, now),
            ClockCharge::Exhausted
        )
    }

    /// Running → Finished: records the verdict and freezes the clock.
    fn finish(&mut self, winner: Option<PlayerId>, condition: WinCondition) {
        debug_assert!(self.state.can_transition_to(SessionState::Finished));
        debug_assert!(self.verdict.is_none());

        self.state = SessionState::Finished;
        self.verdict = Some(Verdict { winner, condition });
        self.calibration = None;

        match winner {
            Some(winner) => tracing::info!(
                session_id = %self.id,
                winner = %winner,
                condition = %condition,
                round = self.round,
                "game finished"
            ),
            None => tracing::info!(session_id = %self.id, round = self.round, "game drawn"),
        }
    }

    /// Debits the current mover's clock up to `now` and recalibrates.
    fn settle_active_clock(&mut self, now: Instant) {
        let Some(mover) = self.mover_index() else {
            return;
        };
        let Some(calibration) = self.calibration else {
            return;
        };
        match charge(self.seats[mover].remaining, calibration, now) {
            ClockCharge::Exhausted => self.seats[mover].remaining = Duration::ZERO,
            ClockCharge::Spent(spent) => self.seats[mover].remaining -= spent,
        }
        self.calibration = Some(now);
    }

    fn outcome(&self, placed: bool) -> MoveOutcome {
        MoveOutcome {
            placed,
            round: self.round,
            verdict: self.verdict,
        }
    }

    // -- Rating --

    /// Stores the externally computed rating adjustment.
    ///
    /// The engine never computes rating deltas itself; the rating
    /// collaborator reads the verdict and writes its result back here.
    ///
    /// # Errors
    /// - [`GameError::NotRated`] if this session's config is unrated.
    /// - [`GameError::GameNotFinished`] before a verdict exists.
    pub fn record_rating_delta(&mut self, delta: i32) -> Result<(), GameError> {
        if !self.config.rated {
            return Err(GameError::NotRated(self.id));
        }
        if !self.state.is_finished() {
            return Err(GameError::GameNotFinished(self.id));
        }
        self.rating_delta = Some(delta);
        tracing::info!(session_id = %self.id, delta, "rating delta recorded");
        Ok(())
    }

    /// A read-only copy of the full session state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            kind: self.config.kind,
            opening: self.config.opening,
            state: self.state,
            round: self.round,
            board: self.board.clone(),
            seats: self.seats.clone(),
            turns: self.turns.clone(),
            to_move: self.to_move(),
            verdict: self.verdict,
            rating_delta: self.rating_delta,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
