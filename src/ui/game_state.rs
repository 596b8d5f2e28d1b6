//! Game state management for the tic-tac-toe GUI

use crate::{
    AIEngine, Difficulty, EngineConfig, GameReport, GameSession, MoveResult, Pos,
    SessionConfig, SessionError, UiConfig,
};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::warn;

/// AI computation state
pub enum AiState {
    Idle,
    /// The engine travels to the worker and comes back with its move
    Thinking {
        receiver: Receiver<(AIEngine, MoveResult)>,
        start_time: Instant,
    },
}

/// Main game state
pub struct GameState {
    pub session: GameSession,
    pub last_ai_result: Option<MoveResult>,
    pub last_report: Option<GameReport>,
    pub ai_state: AiState,
    pub suggested_move: Option<Pos>,
    pub message: Option<String>,

    engine: Option<AIEngine>,
    /// Worker from an abandoned game still holding the engine
    returning: Option<Receiver<(AIEngine, MoveResult)>>,
    engine_config: EngineConfig,
    ui_config: UiConfig,
    reports: Receiver<GameReport>,
}

impl GameState {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_config(
            SessionConfig::new(difficulty),
            EngineConfig::default(),
            UiConfig::default(),
        )
    }

    pub fn with_config(session: SessionConfig, engine: EngineConfig, ui: UiConfig) -> Self {
        let (tx, reports) = channel();
        let mut session = GameSession::new(session);
        session.add_listener(Box::new(tx));

        let mut state = Self {
            session,
            last_ai_result: None,
            last_report: None,
            ai_state: AiState::Idle,
            suggested_move: None,
            message: None,
            engine: Some(AIEngine::with_config(engine.clone())),
            returning: None,
            engine_config: engine,
            ui_config: ui,
            reports,
        };
        state.reset();
        state
    }

    /// New game with a random starting side; keeps the scoreboard
    pub fn reset(&mut self) {
        if let AiState::Thinking { receiver, .. } = std::mem::replace(&mut self.ai_state, AiState::Idle) {
            self.returning = Some(receiver);
        }
        self.last_ai_result = None;
        self.last_report = None;
        self.suggested_move = None;
        self.message = None;
        self.session.restart_random(&mut rand::thread_rng());
    }

    pub fn difficulty(&self) -> Difficulty {
        self.session.difficulty()
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        let mut config = *self.session.config();
        config.difficulty = difficulty;
        self.session.set_config(config);
        self.reset();
    }

    pub fn is_ai_turn(&self) -> bool {
        self.session.is_automated_turn()
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Attempt to place a mark at the given position
    pub fn try_place_mark(&mut self, pos: Pos) -> Result<(), String> {
        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }
        if self.session.is_playing() && !self.session.is_human_turn() {
            return Err("Not your turn".to_string());
        }

        self.session.place_mark(pos).map_err(describe)?;
        self.suggested_move = None;
        self.message = None;
        self.poll_reports();
        Ok(())
    }

    /// Start AI thinking
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() {
            return;
        }
        // Wait for the engine so a seeded sequence carries on
        if !self.reclaim_engine() {
            return;
        }

        let board = *self.session.board();
        let color = self.session.active();
        let difficulty = self.session.difficulty();
        let delay = Duration::from_millis(self.ui_config.ai_delay_ms);
        let mut engine = match self.engine.take() {
            Some(engine) => engine,
            None => AIEngine::with_config(self.engine_config.clone()),
        };

        let (tx, rx) = channel();

        thread::spawn(move || {
            let start = Instant::now();
            let result = engine.get_move_with_stats(&board, color, difficulty);
            thread::sleep(delay.saturating_sub(start.elapsed()));
            let _ = tx.send((engine, result));
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if AI has finished thinking
    pub fn check_ai_result(&mut self) {
        let received = match &self.ai_state {
            AiState::Thinking { receiver, .. } => match receiver.try_recv() {
                Ok(received) => Some(received),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    warn!("AI worker exited without a move");
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        if let Some((engine, move_result)) = received {
            self.ai_state = AiState::Idle;
            self.engine = Some(engine);
            self.last_ai_result = Some(move_result);

            match self.session.apply_engine_move(&move_result) {
                Ok(report) if report.blocked => self.message = Some("Blocked!".to_string()),
                Ok(_) => {}
                Err(err) => self.message = Some(describe(err)),
            }
            self.poll_reports();
        }
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Best move for the side to move, two-player mode only
    pub fn request_suggestion(&mut self) {
        if !self.session.is_playing() || self.is_ai_thinking() {
            return;
        }

        let board = *self.session.board();
        let color = self.session.active();
        let engine = self
            .engine
            .get_or_insert_with(|| AIEngine::with_config(self.engine_config.clone()));
        let result = engine.suggest(&board, color);

        self.suggested_move = result.best_move;
        self.last_ai_result = Some(result);
    }

    /// Undo the last player move and the engine reply after it
    pub fn undo(&mut self) {
        if self.is_ai_thinking() {
            return;
        }
        match self.session.undo() {
            Ok(()) => {
                self.suggested_move = None;
                self.message = None;
            }
            Err(err) => self.message = Some(describe(err)),
        }
    }

    /// Take back the engine from an abandoned worker; the stale move is
    /// dropped. Returns false while that worker is still running.
    fn reclaim_engine(&mut self) -> bool {
        let Some(receiver) = &self.returning else {
            return true;
        };
        match receiver.try_recv() {
            Ok((engine, _)) => {
                self.engine = Some(engine);
                self.returning = None;
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                warn!("abandoned AI worker exited without its engine");
                self.returning = None;
                true
            }
        }
    }

    /// Pick up reports sent by the session when a game ends
    fn poll_reports(&mut self) {
        while let Ok(report) = self.reports.try_recv() {
            self.last_report = Some(report);
        }
    }
}

fn describe(err: SessionError) -> String {
    match err {
        SessionError::NotPlaying => "Game is over".to_string(),
        SessionError::Occupied(_) => "Cell is taken".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Mark};

    fn seeded_state() -> GameState {
        GameState::with_config(
            SessionConfig::new(Difficulty::Hard),
            EngineConfig::default().with_randomness(1.0, 1.0).with_seed(21),
            UiConfig { ai_delay_ms: 0 },
        )
    }

    fn wait_for_engine(state: &mut GameState) {
        for _ in 0..500 {
            if state.reclaim_engine() {
                return;
            }
            thread::sleep(Duration::from_millis(2));
        }
        panic!("worker never returned the engine");
    }

    #[test]
    fn test_reset_while_thinking_keeps_engine() {
        let mut state = seeded_state();
        for _ in 0..200 {
            if state.is_ai_turn() {
                break;
            }
            state.reset();
        }
        assert!(state.is_ai_turn());

        state.start_ai_thinking();
        assert!(state.engine.is_none());
        state.reset();
        assert!(!state.is_ai_thinking());

        wait_for_engine(&mut state);
        let mut engine = state.engine.take().expect("engine returned");

        // Same seed, same single call as the worker made
        let mut reference = AIEngine::with_config(state.engine_config.clone());
        let _ = reference.get_move_with_stats(&Board::new(), Mark::O, Difficulty::Hard);

        let board = Board::new();
        for _ in 0..10 {
            assert_eq!(
                engine.get_move(&board, Mark::O, Difficulty::Relaxed),
                reference.get_move(&board, Mark::O, Difficulty::Relaxed)
            );
        }
    }

    #[test]
    fn test_lost_worker_does_not_block() {
        let mut state = seeded_state();
        state.returning = Some(channel().1);
        // Sender dropped: the engine is gone and a fresh one will be built
        assert!(state.reclaim_engine());
        assert!(state.returning.is_none());
    }
}
