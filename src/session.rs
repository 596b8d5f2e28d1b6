//! Session rule layer
//!
//! A `GameSession` owns one game's board and Zen move queues and is their
//! only mutator. It enforces turn order and the Zen window, runs the
//! terminal-state check after every placement, and asks an [`AIEngine`] for
//! the automated side's reply.
//!
//! Phases: `Idle → Playing → { Won(mark), Draw }`. `Playing` is re-entered
//! only through [`GameSession::restart`].
//!
//! # Example
//!
//! ```
//! use tictactoe::{AIEngine, Difficulty, EngineConfig, GameSession, Mark, Phase, Pos, SessionConfig};
//!
//! let mut engine = AIEngine::with_config(EngineConfig::optimal());
//! let mut session = GameSession::new(SessionConfig::new(Difficulty::Hard));
//! session.restart(Mark::X);
//!
//! // Human corner, engine answers in the center
//! let reports = session.play(Pos::from_index(0), &mut engine).unwrap();
//! assert_eq!(reports.len(), 2);
//! assert_eq!(session.board().get(Pos::CENTER), Mark::O);
//! assert_eq!(session.phase(), Phase::Playing);
//! ```

use std::fmt;
use std::sync::mpsc::Sender;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::board::{Board, Mark, Pos};
use crate::config::{Difficulty, SessionConfig};
use crate::engine::{AIEngine, MoveResult};
use crate::error::SessionError;
use crate::rules::{apply_placement, completes_line, evaluate, MoveQueue, Outcome};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Playing,
    Won(Mark),
    Draw,
}

impl Phase {
    #[inline]
    pub fn is_over(self) -> bool {
        matches!(self, Phase::Won(_) | Phase::Draw)
    }
}

/// Game result from the local player's side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerResult {
    Win,
    Loss,
    Draw,
}

/// A single mark written to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub mark: Mark,
    pub pos: Pos,
    /// Cell cleared by the Zen window to make room
    pub evicted: Option<Pos>,
}

/// What one placement did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub placement: Placement,
    pub outcome: Outcome,
    /// Placed by the engine
    pub automated: bool,
    /// The engine took a cell that would have completed a line for the player
    pub blocked: bool,
    /// Engine statistics for automated moves
    pub search: Option<MoveResult>,
}

/// Summary handed to outcome listeners when a game ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    pub difficulty: Difficulty,
    pub outcome: Outcome,
    /// `None` in two-player games
    pub result: Option<PlayerResult>,
    /// Placements made this game
    pub moves: usize,
}

/// Receives finished games, e.g. to update stats or send a notification.
pub trait OutcomeListener: Send {
    fn on_game_over(&mut self, report: &GameReport);
}

/// Forward reports to another thread, e.g. a front-end's event loop.
/// A dropped receiver is ignored.
impl OutcomeListener for Sender<GameReport> {
    fn on_game_over(&mut self, report: &GameReport) {
        let _ = self.send(*report);
    }
}

/// Running totals across restarts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
}

impl Scoreboard {
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x_wins,
            Mark::O => self.o_wins,
            Mark::Empty => 0,
        }
    }

    fn record(&mut self, outcome: &Outcome) {
        match outcome.winner() {
            Some(Mark::X) => self.x_wins += 1,
            Some(Mark::O) => self.o_wins += 1,
            _ if *outcome == Outcome::Draw => self.draws += 1,
            _ => {}
        }
    }
}

/// State restored by undo
#[derive(Debug, Clone)]
struct Snapshot {
    board: Board,
    queues: [MoveQueue; 2],
    active: Mark,
    moves: usize,
    last_move: Option<Pos>,
}

/// One game at a time, played against the engine or between two players.
pub struct GameSession {
    config: SessionConfig,
    board: Board,
    queues: [MoveQueue; 2],
    active: Mark,
    phase: Phase,
    outcome: Outcome,
    moves: usize,
    last_move: Option<Pos>,
    history: Vec<Snapshot>,
    scoreboard: Scoreboard,
    listeners: Vec<Box<dyn OutcomeListener>>,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            board: Board::new(),
            queues: [MoveQueue::new(), MoveQueue::new()],
            active: Mark::X,
            phase: Phase::Idle,
            outcome: Outcome::Ongoing,
            moves: 0,
            last_move: None,
            history: Vec::new(),
            scoreboard: Scoreboard::default(),
            listeners: Vec::new(),
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn OutcomeListener>) {
        self.listeners.push(listener);
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    /// Change mode for the next game. Goes back to `Idle`.
    pub fn set_config(&mut self, config: SessionConfig) {
        self.config = config;
        self.clear_game();
        self.phase = Phase::Idle;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Side whose turn it is
    pub fn active(&self) -> Mark {
        self.active
    }

    pub fn last_move(&self) -> Option<Pos> {
        self.last_move
    }

    pub fn move_count(&self) -> usize {
        self.moves
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Side played by the engine, `None` in two-player games
    pub fn automated(&self) -> Option<Mark> {
        self.config
            .difficulty
            .has_automated_opponent()
            .then(|| self.config.human.opponent())
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn is_automated_turn(&self) -> bool {
        self.is_playing() && self.automated() == Some(self.active)
    }

    pub fn is_human_turn(&self) -> bool {
        self.is_playing() && self.automated() != Some(self.active)
    }

    /// Zen move queue of `mark`, empty in other modes
    pub fn queue(&self, mark: Mark) -> &MoveQueue {
        &self.queues[queue_slot(mark)]
    }

    /// In Zen Mode, the cell `mark` will lose on its next placement
    pub fn fading_cell(&self, mark: Mark) -> Option<Pos> {
        if !self.config.difficulty.is_windowed() || mark == Mark::Empty {
            return None;
        }
        self.queue(mark).fading()
    }

    pub fn can_undo(&self) -> bool {
        self.is_playing() && !self.history.is_empty()
    }

    /// Start a new game with `first` to move.
    #[instrument(skip(self))]
    pub fn restart(&mut self, first: Mark) {
        self.clear_game();
        self.active = if first == Mark::Empty { Mark::X } else { first };
        self.phase = Phase::Playing;
        info!(difficulty = ?self.config.difficulty, first = ?self.active, "game started");
    }

    /// Start a new game with a random side to move
    pub fn restart_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Mark {
        let first = if rng.gen_bool(0.5) { Mark::X } else { Mark::O };
        self.restart(first);
        first
    }

    /// Place a mark for the side to move, by cell index.
    pub fn place_index(&mut self, index: usize) -> Result<TurnReport, SessionError> {
        let pos = Pos::try_from_index(index).ok_or(SessionError::OutOfRange(index))?;
        self.place_mark(pos)
    }

    /// Place a mark for the side to move and advance the turn.
    ///
    /// Fails without touching the session when no game is in progress or the
    /// cell is taken. Whoever controls the active side is not checked here;
    /// front-ends gate player input with [`GameSession::is_human_turn`].
    #[instrument(skip(self))]
    pub fn place_mark(&mut self, pos: Pos) -> Result<TurnReport, SessionError> {
        self.check_placement(pos)?;

        // Undo rewinds to before the last player move
        if !self.is_automated_turn() {
            self.history.push(self.snapshot());
        }
        Ok(self.commit(pos, false, None))
    }

    /// Play the engine's move if it is the automated side's turn.
    ///
    /// Returns `Ok(None)` when a player is to move.
    #[instrument(skip(self, engine))]
    pub fn respond(&mut self, engine: &mut AIEngine) -> Result<Option<TurnReport>, SessionError> {
        if !self.is_playing() {
            return Err(SessionError::NotPlaying);
        }
        if !self.is_automated_turn() {
            return Ok(None);
        }

        let result = engine.get_move_with_stats(&self.board, self.active, self.config.difficulty);
        self.apply_engine_move(&result).map(Some)
    }

    /// Apply a move the engine computed elsewhere (e.g. on a worker thread).
    pub fn apply_engine_move(&mut self, result: &MoveResult) -> Result<TurnReport, SessionError> {
        if !self.is_playing() {
            return Err(SessionError::NotPlaying);
        }
        if !self.is_automated_turn() {
            return Err(SessionError::NotAutomatedTurn);
        }
        let pos = result.best_move.ok_or_else(|| {
            warn!("engine returned no move");
            SessionError::NoMove
        })?;
        self.check_placement(pos)?;

        let blocked = completes_line(&self.board, pos, self.active.opponent());
        Ok(self.commit(pos, blocked, Some(*result)))
    }

    /// One full turn: the player's placement, then the engine's reply
    /// when the game is still running.
    pub fn play(&mut self, pos: Pos, engine: &mut AIEngine) -> Result<Vec<TurnReport>, SessionError> {
        let mut reports = vec![self.place_mark(pos)?];
        if self.is_automated_turn() {
            if let Some(report) = self.respond(engine)? {
                reports.push(report);
            }
        }
        Ok(reports)
    }

    /// Restore the state before the last player placement, dropping the
    /// engine reply that followed it.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Result<(), SessionError> {
        if !self.is_playing() {
            return Err(SessionError::NotPlaying);
        }
        let snapshot = self.history.pop().ok_or(SessionError::NothingToUndo)?;
        self.board = snapshot.board;
        self.queues = snapshot.queues;
        self.active = snapshot.active;
        self.moves = snapshot.moves;
        self.last_move = snapshot.last_move;
        debug!(moves = self.moves, "undo");
        Ok(())
    }

    fn check_placement(&self, pos: Pos) -> Result<(), SessionError> {
        if !self.is_playing() {
            warn!(%pos, "placement outside a running game");
            return Err(SessionError::NotPlaying);
        }
        // Fields are public, so a Pos may point off the board
        if !Pos::is_valid(i32::from(pos.row), i32::from(pos.col)) {
            warn!(?pos, "placement off the board");
            return Err(SessionError::OutOfRange(pos.to_index()));
        }
        if !self.board.is_empty(pos) {
            warn!(%pos, "placement on an occupied cell");
            return Err(SessionError::Occupied(pos));
        }
        Ok(())
    }

    fn commit(&mut self, pos: Pos, blocked: bool, search: Option<MoveResult>) -> TurnReport {
        let mark = self.active;
        let evicted = apply_placement(
            &mut self.board,
            &mut self.queues[queue_slot(mark)],
            mark,
            pos,
            self.config.difficulty.is_windowed(),
        );
        self.moves += 1;
        self.last_move = Some(pos);
        debug!(?mark, %pos, evicted = ?evicted, "placed");

        let outcome = self.advance_turn();
        TurnReport {
            placement: Placement { mark, pos, evicted },
            outcome,
            automated: search.is_some(),
            blocked,
            search,
        }
    }

    /// Evaluate the board; end the game or hand the turn over.
    fn advance_turn(&mut self) -> Outcome {
        let outcome = evaluate(&self.board, self.config.difficulty.draws_possible());
        match outcome {
            Outcome::Ongoing => {
                self.active = self.active.opponent();
            }
            Outcome::Win { mark, .. } => self.finish(Phase::Won(mark), outcome),
            Outcome::Draw => self.finish(Phase::Draw, outcome),
        }
        outcome
    }

    fn finish(&mut self, phase: Phase, outcome: Outcome) {
        self.phase = phase;
        self.outcome = outcome;
        self.history.clear();
        self.scoreboard.record(&outcome);

        let report = GameReport {
            difficulty: self.config.difficulty,
            outcome,
            result: self.player_result(&outcome),
            moves: self.moves,
        };
        info!(?phase, result = ?report.result, moves = report.moves, "game over");
        for listener in &mut self.listeners {
            listener.on_game_over(&report);
        }
    }

    fn player_result(&self, outcome: &Outcome) -> Option<PlayerResult> {
        self.automated()?;
        Some(match outcome.winner() {
            Some(mark) if mark == self.config.human => PlayerResult::Win,
            Some(_) => PlayerResult::Loss,
            None => PlayerResult::Draw,
        })
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            queues: self.queues.clone(),
            active: self.active,
            moves: self.moves,
            last_move: self.last_move,
        }
    }

    fn clear_game(&mut self) {
        self.board = Board::new();
        for queue in &mut self.queues {
            queue.clear();
        }
        self.outcome = Outcome::Ongoing;
        self.moves = 0;
        self.last_move = None;
        self.history.clear();
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("config", &self.config)
            .field("board", &self.board)
            .field("active", &self.active)
            .field("phase", &self.phase)
            .field("moves", &self.moves)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[inline]
fn queue_slot(mark: Mark) -> usize {
    usize::from(mark == Mark::O)
}
